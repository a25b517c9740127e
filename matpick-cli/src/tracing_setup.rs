//! Tracing setup for the matpick CLI
//!
//! Usage:
//!   matpick --debug filter ...                  # Debug logging on stderr
//!   matpick --log-file pick.log pick ...        # Log an interactive session
//!   RUST_LOG=matpick_core=trace matpick ...     # Fine-grained log control
//!
//! Interactive commands draw on the terminal, so without `--log-file` they
//! log nothing, whatever RUST_LOG says.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
    /// Raise the default level to `warn`
    pub quiet: bool,
    /// The command takes over the terminal
    pub interactive: bool,
    /// Append logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl TracingConfig {
    fn default_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Filter directive given the RUST_LOG value, if any
    fn directive(&self, rust_log: Option<&str>) -> String {
        if self.interactive && self.log_file.is_none() {
            return "off".to_string();
        }
        match rust_log {
            Some(env) if !env.is_empty() => env.to_string(),
            _ => self.default_directive().to_string(),
        }
    }
}

/// Initialize tracing on stderr or the configured log file
pub fn init(config: &TracingConfig) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = EnvFilter::try_new(config.directive(rust_log.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .context(format!("Failed to open log file: {:?}", path))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(config.debug)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .compact()
                .try_init()
                .map_err(|err| anyhow!(err))
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.debug) // Show targets in debug mode
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .map_err(|err| anyhow!(err)),
    }
}
