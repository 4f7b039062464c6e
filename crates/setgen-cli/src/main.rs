//! # setgen CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use setgen_cli::generate::{run_gen, GenArgs};
use setgen_cli::inspect::{run_inspect, InspectArgs};
use setgen_cli::DEFAULT_CONFIG;

/// Settings-schema compiler.
///
/// Compiles a declarative settings schema into C++ struct definitions,
/// reflection metadata, and plain-text and HTML documentation.
#[derive(Parser, Debug)]
#[command(name = "setgen", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate (or with --check, verify) every configured output.
    Gen(GenArgs),

    /// Dump the loaded schema or compiled IR as JSON.
    Inspect(InspectArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(config = %cli.config.display(), "setgen starting");

    let result = match cli.command {
        Commands::Gen(args) => run_gen(&args, &cli.config),
        Commands::Inspect(args) => run_inspect(&args, &cli.config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
