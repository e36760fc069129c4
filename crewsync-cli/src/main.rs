//! crewsync: reconcile iPaaS HR crew codes into Planon.
//!
//! # Usage
//!
//! ```text
//! crewsync run [--dry-run] [--netid <ID>...] [--json] [--config <FILE>] [--exclusions <FILE>]
//! crewsync crew-codes [--netid <ID>...] [--json]
//! crewsync catalogs [--json]
//! ```
//!
//! Endpoints and keys come from `DARTMOUTH_API_URL`, `DARTMOUTH_API_KEY`,
//! `PLANON_API_URL` and `PLANON_API_KEY` (or the matching flags).

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{catalogs::CatalogsArgs, crew_codes::CrewCodesArgs, run::RunArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "crewsync",
    version,
    about = "Keep Planon trade and labor-group references in step with HR crew codes",
    long_about = None,
)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile every employee's crew code into Planon.
    Run(RunArgs),

    /// Print the resolved crew code of each employee without touching Planon.
    CrewCodes(CrewCodesArgs),

    /// Print the active Planon trade and labor-group catalogs.
    Catalogs(CatalogsArgs),
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// `RUST_LOG` wins, then `LOG_LEVEL`, then `info`. Logs go to stderr so
/// `--json` output on stdout stays parseable.
fn init_tracing(json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| {
            std::env::var("LOG_LEVEL")
                .ok()
                .filter(|level| !level.trim().is_empty())
                .and_then(|level| EnvFilter::try_new(level.to_ascii_lowercase()).ok())
        })
        .unwrap_or_else(|| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);
    match cli.command {
        Commands::Run(args) => args.run(),
        Commands::CrewCodes(args) => args.run(),
        Commands::Catalogs(args) => args.run(),
    }
}
