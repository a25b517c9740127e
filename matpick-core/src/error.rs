/// Structured error types for matpick-core.
///
/// The picker itself never fails; these errors come from loading option
/// lists, form bundles and configuration. The `matpick` binary wraps them
/// with `anyhow` context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for matpick-core operations
#[derive(Error, Debug)]
pub enum PickError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// File content is not an option list or form bundle
    #[error("Invalid format in file {path:?}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    /// A single option entry could not be used
    #[error("Invalid option at index {index}: {reason}")]
    InvalidOption { index: usize, reason: String },

    /// File or directory not found
    #[error("Path not found: {path:?}")]
    PathNotFound { path: PathBuf },

    /// Empty input file
    #[error("Empty input file: {path:?}")]
    EmptyFile { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for matpick-core operations
pub type Result<T> = std::result::Result<T, PickError>;

impl PickError {
    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            index,
            reason: reason.into(),
        }
    }

    /// Create a path not found error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create an empty file error
    pub fn empty_file(path: impl Into<PathBuf>) -> Self {
        Self::EmptyFile { path: path.into() }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PickError::invalid_option(3, "expected a string or an object");
        assert_eq!(
            err.to_string(),
            "Invalid option at index 3: expected a string or an object"
        );

        let err = PickError::invalid_format("/tmp/suppliers.json", "expected a JSON array");
        assert!(err.to_string().contains("Invalid format"));
        assert!(err.to_string().contains("/tmp/suppliers.json"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let pick_err: PickError = io_err.into();

        assert!(matches!(pick_err, PickError::Io { .. }));
    }
}
