//! Option model for the picker
//!
//! An option is either a bare label or a JSON record. Every consumer reads
//! options through the accessors on [`PickOption`] together with an
//! [`OptionKeys`] value that names the record fields, so the string/record
//! distinction never leaks into filtering, display or selection code.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names used to read records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionKeys {
    /// Field holding the display label
    pub display_key: String,
    /// Field holding the identifier reported to the caller
    pub value_key: String,
    /// Field holding the secondary (supplier) label
    pub secondary_key: String,
    /// Field holding the price badge
    pub price_key: String,
}

impl Default for OptionKeys {
    fn default() -> Self {
        Self {
            display_key: "name".to_string(),
            value_key: "id".to_string(),
            secondary_key: "supplier_name".to_string(),
            price_key: "price".to_string(),
        }
    }
}

impl OptionKeys {
    /// Keys with custom display/value fields and default auxiliary fields
    pub fn new(display_key: impl Into<String>, value_key: impl Into<String>) -> Self {
        Self {
            display_key: display_key.into(),
            value_key: value_key.into(),
            ..Self::default()
        }
    }
}

/// Identifier of an option
///
/// `None` at the call sites (`Option<OptionId>`) is the "no selection"
/// sentinel; an empty identifier is never constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionId {
    Number(i64),
    Text(String),
}

impl OptionId {
    /// Parse a caller-supplied selection; empty input means no selection
    pub fn parse_selection(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<i64>() {
            Ok(n) if n.to_string() == raw => Some(Self::Number(n)),
            _ => Some(Self::Text(raw.to_string())),
        }
    }

    /// Read an identifier out of a JSON value
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Number(i))
                } else {
                    match n.as_f64() {
                        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                            Some(Self::Number(f as i64))
                        }
                        _ => Some(Self::Text(n.to_string())),
                    }
                }
            }
            _ => None,
        }
    }

    /// Loose equality: `2` matches `"2"` but not `"002"`
    pub fn matches(&self, other: &OptionId) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(n), Self::Text(s)) | (Self::Text(s), Self::Number(n)) => {
                n.to_string() == *s
            }
        }
    }

    /// JSON form, as handed back to callers
    pub fn to_json(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for OptionId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for OptionId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One selectable entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PickOption {
    /// Plain label; the text is both label and identifier
    Text(String),
    /// Record with identifier, label and optional auxiliary fields
    Record(Map<String, Value>),
}

impl PickOption {
    /// Build a text option
    pub fn text(label: impl Into<String>) -> Self {
        Self::Text(label.into())
    }

    /// Build a record option from field pairs
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Raw record field (always `None` for text options)
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Text(_) => None,
            Self::Record(map) => map.get(key),
        }
    }

    /// Display label; missing or null fields give an empty label
    pub fn label(&self, keys: &OptionKeys) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            Self::Record(map) => match map.get(&keys.display_key) {
                Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
                Some(Value::Null) | None => Cow::Borrowed(""),
                Some(Value::Number(n)) => Cow::Owned(n.to_string()),
                Some(Value::Bool(b)) => Cow::Owned(b.to_string()),
                Some(other) => Cow::Owned(other.to_string()),
            },
        }
    }

    /// Identifier reported on selection
    pub fn id(&self, keys: &OptionKeys) -> Option<OptionId> {
        match self {
            Self::Text(text) => (!text.is_empty()).then(|| OptionId::Text(text.clone())),
            Self::Record(map) => map.get(&keys.value_key).and_then(OptionId::from_json),
        }
    }

    /// Secondary label (supplier name), when present and non-empty
    pub fn secondary(&self, keys: &OptionKeys) -> Option<&str> {
        match self.field(&keys.secondary_key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric price, when present
    pub fn price(&self, keys: &OptionKeys) -> Option<f64> {
        match self.field(&keys.price_key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// JSON form, as handed back to callers
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::from(text.as_str()),
            Self::Record(map) => Value::Object(map.clone()),
        }
    }
}

/// First option (input order) whose identifier loosely equals `id`
pub fn find_option<'a>(
    options: &'a [PickOption],
    id: &OptionId,
    keys: &OptionKeys,
) -> Option<(usize, &'a PickOption)> {
    options
        .iter()
        .enumerate()
        .find(|(_, option)| option.id(keys).is_some_and(|candidate| candidate.matches(id)))
}

/// Whether every option has the same shape
pub fn is_homogeneous(options: &[PickOption]) -> bool {
    match options.first() {
        Some(first) => options.iter().all(|o| o.is_text() == first.is_text()),
        None => true,
    }
}
