//! Academy CLI - course content repository.
//!
//! Provides commands for:
//! - `toc`: Print the table of contents
//! - `render`: Print a document's rendered content or a resource's bytes
//! - `show`: Describe a document or resource
//! - `check`: Validate qualification and quiz markup

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use academy_config::{CliSettings, Config};
use academy_repository::Repository;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RenderArgs, ShowArgs, TocArgs};
use error::CliError;
use output::Output;

/// Academy - course content repository.
#[derive(Parser)]
#[command(name = "academy", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover academy.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Repository root directory (overrides config).
    #[arg(long, global = true, env = "ACADEMY_ROOT")]
    root: Option<PathBuf>,

    /// Fail on misplaced quiz elements instead of warning.
    #[arg(long, global = true)]
    strict: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl GlobalArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            root: self.root.clone(),
            strict: self.strict.then_some(true),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Load configuration and open the repository it names.
    pub(crate) fn repository(&self) -> Result<Repository, CliError> {
        let config = self.config()?;
        tracing::info!(root = %config.root.display(), "Opening repository");
        Ok(Repository::from_config(&config)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the table of contents.
    Toc(TocArgs),
    /// Print a document's content or a resource's bytes.
    Render(RenderArgs),
    /// Describe a document or resource.
    Show(ShowArgs),
    /// Check document qualification and quiz markup.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Toc(args) => args.execute(&cli.global),
        Commands::Render(args) => args.execute(&cli.global, &output),
        Commands::Show(args) => args.execute(&cli.global),
        Commands::Check(args) => args.execute(&cli.global, &output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
