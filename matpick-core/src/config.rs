use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PickError, Result};
use crate::option::OptionKeys;
use crate::select::SelectConfig;

/// Picker defaults, read from ~/.matpick/config.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatpickConfig {
    pub picker: PickerSection,
    pub keys: OptionKeys,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerSection {
    pub placeholder: String,
    pub search_placeholder: String,
    pub max_height: u16,
    pub max_results: usize,
}

impl Default for PickerSection {
    fn default() -> Self {
        let defaults = SelectConfig::default();
        Self {
            placeholder: defaults.placeholder,
            search_placeholder: defaults.search_placeholder,
            max_height: defaults.max_height,
            max_results: defaults.max_results,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub currency: String,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            currency: "$".to_string(),
        }
    }
}

impl MatpickConfig {
    /// Load config from `$MATPICK_CONFIG` or ~/.matpick/config.toml
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path; missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            PickError::config(format!("invalid TOML in {}: {}", path.display(), e))
        })
    }

    /// Config file path: `$MATPICK_CONFIG` or ~/.matpick/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("MATPICK_CONFIG") {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".matpick/config.toml")
    }

    /// Write config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| PickError::config(format!("failed to serialize config: {}", e)))
    }

    /// Picker settings derived from this config
    pub fn select_config(&self) -> SelectConfig {
        SelectConfig {
            placeholder: self.picker.placeholder.clone(),
            search_placeholder: self.picker.search_placeholder.clone(),
            keys: self.keys.clone(),
            disabled: false,
            max_height: self.picker.max_height,
            max_results: self.picker.max_results,
            currency: self.display.currency.clone(),
        }
    }
}
