// SPDX-License-Identifier: MIT

//! gman - a configuration-driven supervisor that watches filesystem and
//! VCS targets on a cron schedule and runs fork/join callback pipelines
//! on each detected change (spec.md §6).
//!
//! Grounded on the original's `parse_args`/`event_loop`/`helper`
//! (`examples/original_source/main.py`).

mod clean;
mod exit_error;
mod list_schedule;
mod list_targets;
mod logging;
mod run;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fixed names for the rotated scratch directory and log file, matching
/// the original's `TEMPDIR`/`LOGFILE` (spec.md §6 "Persisted state").
pub const SCRATCH_DIR_NAME: &str = ".gman_tempdir";
pub const LOG_FILE_NAME: &str = "gman.log";

#[derive(Parser)]
#[command(name = "gman", version, about = "A cron-scheduled target monitor and callback pipeline supervisor")]
struct Cli {
    /// Path to the configuration file (required for all but `clean`).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Force debug-level logging regardless of the config's `debug` flag.
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter the supervisor loop.
    Run,
    /// Print each monitor's name and its resolved targets.
    ListTargets {
        /// Restrict output to a single job's monitor.
        name: Option<String>,
    },
    /// Print the next five scheduled fire times per monitor.
    ListSchedule {
        /// Restrict output to a single job's monitor.
        name: Option<String>,
    },
    /// Remove rotated scratch directories and log files from the cwd.
    Clean,
}

#[tokio::main]
async fn main() {
    if let Err(err) = dispatch().await {
        let code = err
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |e| e.code);
        eprintln!("Error: {err:#}");
        std::process::exit(code);
    }
}

async fn dispatch() -> Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::Clean) {
        return clean::run();
    }

    let config_path = cli
        .config
        .ok_or_else(|| exit_error::ExitError::config("-c/--config is required"))?;

    match cli.command {
        Commands::Run => run::run(&config_path, cli.verbose).await,
        Commands::ListTargets { name } => list_targets::run(&config_path, name.as_deref()),
        Commands::ListSchedule { name } => list_schedule::run(&config_path, name.as_deref()),
        Commands::Clean => unreachable!("handled above"),
    }
}
