use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use matpick_core::MatpickConfig;

use crate::ui;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with the default settings
    Init(InitArgs),
    /// Show config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args, &MatpickConfig::config_path()),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
    }
}

fn run_init(args: InitArgs, config_path: &Path) -> Result<()> {
    // Check if config already exists
    if config_path.exists() && !args.force {
        return Err(anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    MatpickConfig::default()
        .save_to(config_path)
        .context(format!("Failed to write config file: {:?}", config_path))?;

    ui::status(format!("✅ Created config at: {:?}", config_path));
    ui::status(format!("\nEdit it with: $EDITOR {:?}", config_path));
    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", MatpickConfig::config_path().display());
    Ok(())
}

fn run_show() -> Result<()> {
    let config = MatpickConfig::load().context("Failed to load config")?;
    print!("{}", config.to_toml()?);
    Ok(())
}
