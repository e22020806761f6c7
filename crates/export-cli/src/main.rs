//! Client interface extraction CLI.
//!
//! Scans Rust sources for exported REST handlers and writes a regenerated
//! base trait plus a write-once leaf trait for each of them.
//!
//! # Examples
//!
//! ```bash
//! # Generate into a client module
//! client-export generate --source src \
//!     --application-name orders --export-module-path /work/orders-client
//!
//! # Preview without writing
//! client-export inspect --source src --format json
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use client_export_cli::commands::config::{ExportArgs, SourceArgs};
use client_export_cli::commands::{completions, generate, inspect};
use client_export_cli::exit_code_for;
use client_export_core::cli::{ExitCode, OutputFormat};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Client export - generate client interfaces from REST handlers.
#[derive(Parser, Debug)]
#[command(name = "client-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one extraction round and write interface files.
    ///
    /// Base interfaces are rewritten every run. Leaf interfaces are written
    /// only when missing.
    Generate {
        #[command(flatten)]
        args: ExportArgs,
    },

    /// List qualifying types and their signatures without writing.
    Inspect {
        #[command(flatten)]
        args: SourceArgs,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("failed to initialize logging: {e}");
    }

    let exit_code = match execute_command(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging infrastructure.
///
/// `--verbose` forces debug level; otherwise `RUST_LOG` applies, falling
/// back to info. Logs go to stderr so reports on stdout stay parseable.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Routes the parsed command to its handler.
fn execute_command(cli: Cli) -> Result<ExitCode> {
    let output_format: OutputFormat = cli.format.parse()?;

    match cli.command {
        Commands::Generate { args } => generate::run(&args, output_format),
        Commands::Inspect { args } => inspect::run(&args, output_format),
        Commands::Completions { shell } => completions::run(shell, &mut Cli::command()),
    }
}
