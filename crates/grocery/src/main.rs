//! Grocery - sales dashboard and reports
//!
//! # Usage
//!
//! ```bash
//! # Create the schema and load the demo dataset
//! grocery init
//! grocery seed
//!
//! # Executive dashboard followed by every report
//! grocery dashboard
//!
//! # A single report
//! grocery report employees --range 30d
//! grocery report trends --period monthly --format csv
//! ```

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use grocery_config::Config;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Grocery - sales dashboard and reports
#[derive(Parser, Debug)]
#[command(name = "grocery")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database file. Overrides config file.
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database schema
    Init,

    /// Load the demo dataset into an empty database
    Seed,

    /// Executive dashboard followed by every report
    Dashboard(cmd::dashboard::DashboardArgs),

    /// Run a single report
    Report(cmd::report::ReportArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = cmd::load_config(cli.config.as_deref())?;
    if let Some(path) = cli.database {
        config.database.path = path;
    }

    let log_level = resolve_log_level(cli.log_level.as_deref(), &config);
    init_logging(&log_level)?;

    match cli.command {
        Command::Init => cmd::init::run(&config).await,
        Command::Seed => cmd::seed::run(&config).await,
        Command::Dashboard(args) => cmd::dashboard::run(args, &config).await,
        Command::Report(args) => cmd::report::run(args, &config).await,
    }
}

/// Resolve log level: CLI flag > config file > default "info"
///
/// A config without a `[log]` section carries the `info` default.
fn resolve_log_level(cli_level: Option<&str>, config: &Config) -> String {
    match cli_level {
        Some(level) => level.to_string(),
        None => config.log.level.as_str().to_string(),
    }
}

/// Initialize the tracing subscriber, writing to stderr
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .with(filter)
        .init();

    Ok(())
}
