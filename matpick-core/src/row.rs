//! Row content for the result list

use serde::Serialize;

use crate::option::{OptionKeys, PickOption};

/// What a single result row displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionRow {
    /// Main line (option name)
    pub primary: String,
    /// Second line (supplier), if any
    pub secondary: Option<String>,
    /// Right-aligned badge (price), if any
    pub badge: Option<String>,
}

impl OptionRow {
    /// Single-line row with no extras
    pub fn plain(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
            badge: None,
        }
    }

    /// Default two-line layout: name, optional supplier, optional price badge
    pub fn standard(option: &PickOption, keys: &OptionKeys, currency: &str) -> Self {
        Self {
            primary: option.label(keys).into_owned(),
            secondary: option.secondary(keys).map(str::to_string),
            badge: option.price(keys).map(|price| format_price(price, currency)),
        }
    }
}

/// Custom row renderer installed on a picker
pub type RowRenderer = Box<dyn Fn(&PickOption, &OptionKeys) -> OptionRow>;

/// Format a price badge, e.g. `$1,250.00`
pub fn format_price(price: f64, currency: &str) -> String {
    let negative = price < 0.0;
    let fixed = format!("{:.2}", price.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}{}.{}", sign, currency, grouped, cents)
}
