//! matpick CLI - searchable single-select pickers for procurement data
//!
//! Subcommands:
//! - `pick`: interactive picker over one option list, prints the selection as JSON
//! - `form`: several pickers from a form bundle, prints every field's selection
//! - `filter`: non-interactive, prints the rows a search would render
//! - `config`: manage ~/.matpick/config.toml
//! - `completions`: shell completion scripts

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod tracing_setup;
mod tui;
mod ui;

#[derive(Parser, Debug)]
#[command(
    name = "matpick",
    author,
    version,
    about = "Searchable single-select pickers for materials, suppliers and projects",
    long_about = "Pick one option from a JSON list with type-to-filter search. Works \
                  interactively in the terminal or as a plain filter for scripts."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress progress spinners and status text (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Append logs to this file (interactive commands log nowhere otherwise)
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pick one option interactively and print it as JSON
    Pick(commands::pick::PickArgs),
    /// Fill a form of pickers from a bundle file and print all selections
    Form(commands::pick::FormArgs),
    /// Print the rows a search would render (no terminal UI)
    Filter(commands::filter::FilterArgs),
    /// Manage matpick configuration (init, path, show)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

impl Commands {
    /// Whether the command takes over the terminal
    fn is_interactive(&self) -> bool {
        matches!(self, Commands::Pick(_) | Commands::Form(_))
    }
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.command.is_interactive(),
        log_file: cli.log_file.clone(),
    })?;

    // Initialize UI quiet mode from flag, env var, and TTY detection
    ui::init_quiet_mode(cli.quiet);

    match cli.command {
        Commands::Pick(args) => commands::run_pick(args)?,
        Commands::Form(args) => commands::run_form(args)?,
        Commands::Filter(args) => commands::run_filter(args)?,
        Commands::Config(args) => config::run_config(args)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
