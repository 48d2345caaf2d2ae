//! checkmate CLI tool.
//!
//! Usage:
//! ```bash
//! checkmate run [OPTIONS] [PATH]
//! checkmate init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Runs declarative check plans and prints an aligned report
#[derive(Parser)]
#[command(name = "checkmate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the check plan
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the checks in a plan
    Run {
        /// Directory to look for the plan in (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Column at which statuses are aligned (overrides the plan)
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Initialize a check plan
    Init {
        /// Overwrite existing plan
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned report lines followed by a summary.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            path,
            format,
            width,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::run::run(&source, format, width)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
