//! cfdx - certainty factor diagnosis from the command line
//!
//! - Rank likely damages for a set of reported symptoms
//! - Explain how each certainty factor was reached
//! - Check a catalog file for integrity problems
//! - Inspect recorded diagnosis sessions

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use crate::commands::{diagnose, levels, sessions, validate};
use crate::config::{CliConfig, LoggingConfig};
use crate::error::{CliError, CliResult};
use crate::output::{print_error, print_json};

/// cfdx CLI application
#[derive(Parser)]
#[command(name = "cfdx")]
#[command(about = "Certainty factor diagnosis for expert rule catalogs", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(long, env = "CFDX_CONFIG", global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Rank damages for the reported symptoms
    Diagnose(diagnose::DiagnoseArgs),

    /// Check a catalog for integrity issues
    Validate(validate::ValidateArgs),

    /// Show the symptom answer scale and result levels
    Levels(levels::LevelsArgs),

    /// Count or list recorded sessions
    Sessions(sessions::SessionsArgs),

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            print_error(&CliError::from(e).to_string());
            return ExitCode::FAILURE;
        }
    };
    if cli.log_json {
        config.logging.json = true;
    }
    init_tracing(&config.logging, cli.verbose);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &CliConfig) -> CliResult<()> {
    match command {
        Commands::Diagnose(args) => diagnose::execute(args, config).await,
        Commands::Validate(args) => validate::execute(args, config).await,
        Commands::Levels(args) => levels::execute(args),
        Commands::Sessions(args) => sessions::execute(args, config).await,
        Commands::Config => print_json(config),
    }
}

/// Logs go to stderr so stdout stays parseable.
fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let default = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
