//! `matpick pick` and `matpick form`: interactive pickers

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use matpick_core::{load_form, load_options, FieldSpec, FormSpec, MatpickConfig, OptionId};
use tracing::info;

use crate::tui;
use crate::ui;

#[derive(Parser, Debug)]
pub struct PickArgs {
    /// JSON file with the option list
    #[arg(long, value_name = "FILE")]
    pub options: PathBuf,

    /// Initially selected identifier
    #[arg(long)]
    pub value: Option<String>,

    /// Field label shown above the trigger
    #[arg(long, default_value = "Selection")]
    pub label: String,

    /// Record field shown as the label
    #[arg(long)]
    pub display_key: Option<String>,

    /// Record field used as the identifier
    #[arg(long)]
    pub value_key: Option<String>,

    /// Trigger text when nothing is selected
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Hint shown in the empty search box
    #[arg(long)]
    pub search_placeholder: Option<String>,

    /// Show the picker but never open it
    #[arg(long)]
    pub disabled: bool,

    /// Visible list rows
    #[arg(long)]
    pub max_height: Option<u16>,
}

#[derive(Parser, Debug)]
pub struct FormArgs {
    /// JSON form bundle (title plus fields)
    #[arg(long, value_name = "FILE")]
    pub bundle: PathBuf,
}

impl PickArgs {
    fn into_form(self) -> Result<FormSpec> {
        let pb = ui::spinner(format!("Loading {}", self.options.display()));
        let options = load_options(&self.options)
            .with_context(|| format!("Failed to load options from {}", self.options.display()))?;
        ui::finish_spinner(pb, format!("Loaded {} options", options.len()));

        let mut field = FieldSpec::new(self.label, options);
        field.value = self.value.as_deref().and_then(OptionId::parse_selection);
        field.display_key = self.display_key;
        field.value_key = self.value_key;
        field.placeholder = self.placeholder;
        field.search_placeholder = self.search_placeholder;
        field.disabled = self.disabled;
        field.max_height = self.max_height;

        Ok(FormSpec {
            title: None,
            fields: vec![field],
        })
    }
}

pub fn run_pick(args: PickArgs) -> Result<()> {
    let config = MatpickConfig::load().context("Failed to load config")?;
    let form = args.into_form()?;

    let app = tui::run(form, &config.select_config())?;
    let field = app
        .fields
        .first()
        .ok_or_else(|| anyhow!("picker has no field"))?;

    info!(value = ?field.value, "picker finished");
    println!("{}", serde_json::to_string_pretty(&field.result_json())?);
    Ok(())
}

pub fn run_form(args: FormArgs) -> Result<()> {
    let config = MatpickConfig::load().context("Failed to load config")?;

    let pb = ui::spinner(format!("Loading {}", args.bundle.display()));
    let form = load_form(&args.bundle)
        .with_context(|| format!("Failed to load form from {}", args.bundle.display()))?;
    ui::finish_spinner(pb, format!("Loaded {} fields", form.fields.len()));

    let app = tui::run(form, &config.select_config())?;
    info!(fields = app.fields.len(), "form finished");
    println!("{}", serde_json::to_string_pretty(&app.results_json())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pick_args_build_single_field_form() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("suppliers.json");
        std::fs::write(&path, r#"[{"code": "S1", "title": "Acme"}]"#).unwrap();

        let args = PickArgs::parse_from([
            "pick",
            "--options",
            path.to_str().unwrap(),
            "--value",
            "S1",
            "--display-key",
            "title",
            "--value-key",
            "code",
            "--label",
            "Supplier",
        ]);
        let form = args.into_form().unwrap();

        assert_eq!(form.fields.len(), 1);
        let field = &form.fields[0];
        assert_eq!(field.label, "Supplier");
        assert_eq!(field.value, Some(OptionId::Text("S1".into())));
        assert_eq!(field.display_key.as_deref(), Some("title"));
        assert_eq!(field.value_key.as_deref(), Some("code"));
    }

    #[test]
    fn test_empty_value_flag_means_no_selection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("units.json");
        std::fs::write(&path, r#"["kg", "m"]"#).unwrap();

        let args = PickArgs::parse_from(["pick", "--options", path.to_str().unwrap(), "--value", ""]);
        assert_eq!(args.into_form().unwrap().fields[0].value, None);
    }

    #[test]
    fn test_missing_options_file() {
        let args = PickArgs::parse_from(["pick", "--options", "/nonexistent/options.json"]);
        let err = args.into_form().unwrap_err();
        assert!(err.to_string().contains("Failed to load options"));
    }
}
