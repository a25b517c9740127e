//! Loading option lists and form bundles from JSON files
//!
//! Option files hold what a REST endpoint would have returned: a JSON array
//! of strings or objects, optionally wrapped in `{"items": [...]}` or
//! `{"data": [...]}`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{PickError, Result};
use crate::option::{is_homogeneous, OptionId, PickOption};
use crate::select::SelectConfig;

/// Envelope keys unwrapped around an option array
static ENVELOPE_KEYS: [&str; 2] = ["items", "data"];

/// Read a JSON file, reporting missing and empty files distinctly
fn read_json(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(PickError::path_not_found(path));
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(PickError::empty_file(path));
    }
    serde_json::from_str(&content).map_err(|e| PickError::json(path.display().to_string(), e))
}

/// Turn a parsed JSON document into options
pub fn parse_options(value: Value, origin: &Path) -> Result<Vec<PickOption>> {
    let elements = match value {
        Value::Array(elements) => elements,
        Value::Object(mut map) => {
            let key = ENVELOPE_KEYS
                .iter()
                .find(|key| matches!(map.get(**key), Some(Value::Array(_))));
            match key.and_then(|key| map.remove(*key)) {
                Some(Value::Array(elements)) => elements,
                _ => {
                    return Err(PickError::invalid_format(
                        origin,
                        "expected a JSON array or an object with an \"items\" or \"data\" array",
                    ))
                }
            }
        }
        _ => {
            return Err(PickError::invalid_format(origin, "expected a JSON array"));
        }
    };

    let options = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::String(text) => Ok(PickOption::Text(text)),
            Value::Object(map) => Ok(PickOption::Record(map)),
            other => Err(PickError::invalid_option(
                index,
                format!("expected a string or an object, found {}", json_kind(&other)),
            )),
        })
        .collect::<Result<Vec<_>>>()?;

    if !is_homogeneous(&options) {
        warn!(
            origin = %origin.display(),
            "option list mixes plain labels and records; display may be inconsistent"
        );
    }

    Ok(options)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Load an option list from a JSON file
pub fn load_options(path: &Path) -> Result<Vec<PickOption>> {
    let value = read_json(path)?;
    let options = parse_options(value, path)?;
    info!(path = %path.display(), count = options.len(), "loaded options");
    Ok(options)
}

/// A whole form: several pickers shown together
#[derive(Debug, Clone, PartialEq)]
pub struct FormSpec {
    pub title: Option<String>,
    pub fields: Vec<FieldSpec>,
}

/// One picker within a form
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub label: String,
    pub options: Vec<PickOption>,
    /// Initial value
    pub value: Option<OptionId>,
    pub placeholder: Option<String>,
    pub search_placeholder: Option<String>,
    pub display_key: Option<String>,
    pub value_key: Option<String>,
    pub disabled: bool,
    pub max_height: Option<u16>,
}

impl FieldSpec {
    /// A field with the given options and no overrides
    pub fn new(label: impl Into<String>, options: Vec<PickOption>) -> Self {
        Self {
            label: label.into(),
            options,
            value: None,
            placeholder: None,
            search_placeholder: None,
            display_key: None,
            value_key: None,
            disabled: false,
            max_height: None,
        }
    }

    /// Apply this field's overrides on top of `base`
    pub fn select_config(&self, base: &SelectConfig) -> SelectConfig {
        let mut config = base.clone();
        if let Some(placeholder) = &self.placeholder {
            config.placeholder = placeholder.clone();
        }
        if let Some(search_placeholder) = &self.search_placeholder {
            config.search_placeholder = search_placeholder.clone();
        }
        if let Some(display_key) = &self.display_key {
            config.keys.display_key = display_key.clone();
        }
        if let Some(value_key) = &self.value_key {
            config.keys.value_key = value_key.clone();
        }
        if let Some(max_height) = self.max_height {
            config.max_height = max_height;
        }
        config.disabled = self.disabled;
        config
    }
}

#[derive(Debug, Deserialize)]
struct RawForm {
    title: Option<String>,
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    label: String,
    options: Option<Value>,
    options_file: Option<PathBuf>,
    #[serde(default)]
    value: Value,
    placeholder: Option<String>,
    search_placeholder: Option<String>,
    display_key: Option<String>,
    value_key: Option<String>,
    #[serde(default)]
    disabled: bool,
    max_height: Option<u16>,
}

/// Load a form bundle; `options_file` entries resolve relative to it
pub fn load_form(path: &Path) -> Result<FormSpec> {
    let value = read_json(path)?;
    let raw: RawForm =
        serde_json::from_value(value).map_err(|e| PickError::json(path.display().to_string(), e))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut fields = Vec::with_capacity(raw.fields.len());
    for field in raw.fields {
        let options = match (field.options, field.options_file) {
            (Some(inline), _) => parse_options(inline, path)?,
            (None, Some(file)) => load_options(&base_dir.join(file))?,
            (None, None) => Vec::new(),
        };

        fields.push(FieldSpec {
            label: field.label,
            options,
            value: OptionId::from_json(&field.value),
            placeholder: field.placeholder,
            search_placeholder: field.search_placeholder,
            display_key: field.display_key,
            value_key: field.value_key,
            disabled: field.disabled,
            max_height: field.max_height,
        });
    }

    if fields.is_empty() {
        return Err(PickError::invalid_format(path, "form has no fields"));
    }

    Ok(FormSpec {
        title: raw.title,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_parse_plain_array() {
        let options = parse_options(json!(["Site A", "Site B"]), Path::new("inline")).unwrap();
        assert_eq!(options, vec![PickOption::text("Site A"), PickOption::text("Site B")]);
    }

    #[test]
    fn test_parse_envelope() {
        let options = parse_options(
            json!({"total": 1, "data": [{"id": 1, "name": "Cement"}]}),
            Path::new("inline"),
        )
        .unwrap();
        assert_eq!(options.len(), 1);
        assert!(!options[0].is_text());
    }

    #[test]
    fn test_parse_rejects_scalars() {
        let err = parse_options(json!(["ok", 5]), Path::new("inline")).unwrap_err();
        match err {
            PickError::InvalidOption { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("a number"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_list() {
        let err = parse_options(json!({"name": "x"}), Path::new("inline")).unwrap_err();
        assert!(matches!(err, PickError::InvalidFormat { .. }));
    }

    #[test]
    fn test_load_options_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load_options(&missing).unwrap_err(),
            PickError::PathNotFound { .. }
        ));

        let empty = dir.path().join("empty.json");
        fs::write(&empty, "  \n").unwrap();
        assert!(matches!(load_options(&empty).unwrap_err(), PickError::EmptyFile { .. }));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "[{\"id\": 1,").unwrap();
        assert!(matches!(load_options(&broken).unwrap_err(), PickError::Json { .. }));
    }

    #[test]
    fn test_load_form_with_options_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("suppliers.json"),
            r#"[{"id": "S1", "name": "Acme"}, {"id": "S2", "name": "Northern Metals"}]"#,
        )
        .unwrap();
        let bundle = dir.path().join("request.json");
        fs::write(
            &bundle,
            r#"{
                "title": "Purchase request",
                "fields": [
                    {"label": "Supplier", "options_file": "suppliers.json", "value": "S2"},
                    {"label": "Project", "options": ["Tower A", "Bridge"], "disabled": true},
                    {"label": "Engineer", "options": [], "value": "", "placeholder": "Pick engineer"}
                ]
            }"#,
        )
        .unwrap();

        let form = load_form(&bundle).unwrap();
        assert_eq!(form.title.as_deref(), Some("Purchase request"));
        assert_eq!(form.fields.len(), 3);
        assert_eq!(form.fields[0].options.len(), 2);
        assert_eq!(form.fields[0].value, Some(OptionId::Text("S2".into())));
        assert!(form.fields[1].disabled);
        assert_eq!(form.fields[2].value, None);

        let config = form.fields[2].select_config(&SelectConfig::default());
        assert_eq!(config.placeholder, "Pick engineer");
        assert_eq!(config.search_placeholder, "Search...");
    }

    #[test]
    fn test_load_form_without_fields() {
        let dir = TempDir::new().unwrap();
        let bundle = dir.path().join("empty-form.json");
        fs::write(&bundle, r#"{"fields": []}"#).unwrap();
        assert!(matches!(
            load_form(&bundle).unwrap_err(),
            PickError::InvalidFormat { .. }
        ));
    }
}
