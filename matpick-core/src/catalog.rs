//! Typed catalog items
//!
//! Catalog items are the most common record-shaped options: priced,
//! named materials offered by a supplier.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::option::{OptionId, OptionKeys, PickOption};

/// A purchasable material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: OptionId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl CatalogItem {
    /// Read a catalog item back out of a selected option
    pub fn from_option(option: &PickOption, keys: &OptionKeys) -> Option<Self> {
        if option.is_text() {
            return None;
        }
        Some(Self {
            id: option.id(keys)?,
            name: option.label(keys).into_owned(),
            supplier_name: option.secondary(keys).map(str::to_string),
            price: option.price(keys),
            unit: match option.field("unit") {
                Some(Value::String(unit)) => Some(unit.clone()),
                _ => None,
            },
        })
    }
}

impl From<CatalogItem> for PickOption {
    fn from(item: CatalogItem) -> Self {
        let mut fields = vec![
            ("id", item.id.to_json()),
            ("name", Value::from(item.name)),
        ];
        if let Some(supplier) = item.supplier_name {
            fields.push(("supplier_name", Value::from(supplier)));
        }
        if let Some(price) = item.price {
            fields.push(("price", Value::from(price)));
        }
        if let Some(unit) = item.unit {
            fields.push(("unit", Value::from(unit)));
        }
        PickOption::record(fields)
    }
}
