//! `matpick filter`: print what the picker would render for a search

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use matpick_core::{
    load_options, ListView, MatpickConfig, OptionId, PickOption, SearchableSelect, SelectConfig,
    SelectProps,
};
use serde_json::{json, Value};
use tracing::info;

use crate::ui;

#[derive(Parser, Debug)]
pub struct FilterArgs {
    /// JSON file with the option list
    #[arg(long, value_name = "FILE")]
    pub options: PathBuf,

    /// Search text
    #[arg(long, short = 'Q', default_value = "")]
    pub query: String,

    /// Current value, marked in the output
    #[arg(long)]
    pub value: Option<String>,

    /// Record field shown as the label
    #[arg(long)]
    pub display_key: Option<String>,

    /// Record field used as the identifier
    #[arg(long)]
    pub value_key: Option<String>,

    /// Cap on rendered results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FilterArgs {
    fn select_config(&self, config: &MatpickConfig) -> SelectConfig {
        let mut select = config.select_config();
        if let Some(key) = &self.display_key {
            select.keys.display_key = key.clone();
        }
        if let Some(key) = &self.value_key {
            select.keys.value_key = key.clone();
        }
        if let Some(limit) = self.limit {
            select.max_results = limit;
        }
        select
    }
}

pub fn run_filter(args: FilterArgs) -> Result<()> {
    let config = MatpickConfig::load().context("Failed to load config")?;

    let pb = ui::spinner(format!("Loading {}", args.options.display()));
    let options = load_options(&args.options)
        .with_context(|| format!("Failed to load options from {}", args.options.display()))?;
    ui::finish_spinner(pb, format!("Loaded {} options", options.len()));
    info!(count = options.len(), path = %args.options.display(), "options loaded");

    let mut select = SearchableSelect::new(args.select_config(&config));
    select.set_search(args.query.as_str());

    let value = args.value.as_deref().and_then(OptionId::parse_selection);
    let view = select.view(SelectProps::new(&options, value.as_ref()));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => write_text(&mut out, &view)?,
        OutputFormat::Json => {
            let doc = view_json(&view, &options, &select, &args.query);
            writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        }
    }
    Ok(())
}

fn write_text(out: &mut impl Write, view: &ListView) -> Result<()> {
    for row in &view.rows {
        let marker = if row.selected { "*" } else { " " };
        let mut line = format!("{} {}", marker, row.content.primary);
        if let Some(secondary) = &row.content.secondary {
            line.push_str(&format!("  ({})", secondary));
        }
        if let Some(badge) = &row.content.badge {
            line.push_str(&format!("  {}", badge));
        }
        writeln!(out, "{}", line)?;
    }
    if let Some(empty) = &view.empty {
        writeln!(out, "{}", empty)?;
    }
    if let Some(footer) = &view.footer {
        writeln!(out, "{}", footer)?;
    }
    Ok(())
}

fn view_json(view: &ListView, options: &[PickOption], select: &SearchableSelect, query: &str) -> Value {
    let keys = &select.config().keys;
    let rows: Vec<Value> = view
        .rows
        .iter()
        .map(|row| {
            let value = options[row.index]
                .id(keys)
                .map(|id| id.to_json())
                .unwrap_or(Value::Null);
            json!({
                "index": row.index,
                "value": value,
                "label": row.content.primary,
                "secondary": row.content.secondary,
                "badge": row.content.badge,
                "selected": row.selected,
            })
        })
        .collect();

    json!({
        "query": query,
        "total_matches": view.total_matches,
        "rows": rows,
        "footer": view.footer,
        "empty": view.empty.as_ref().map(ToString::to_string),
    })
}
