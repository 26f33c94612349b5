// SPDX-License-Identifier: MIT

//! `gman run` — enter the supervisor loop (spec.md §6, §4.8).
//!
//! Grounded on the original's `event_loop`: rotate the scratch dir and
//! log file, parse the config, build the monitor graph, then loop until
//! interrupted.

use crate::{exit_error::ExitError, logging, SCRATCH_DIR_NAME, LOG_FILE_NAME};
use anyhow::{Context, Result};
use gman_core::SystemClock;
use gman_engine::{ScratchDir, Supervisor};
use std::path::Path;
use std::sync::Arc;

pub async fn run(config_path: &Path, verbose: bool) -> Result<()> {
    let log_path = Path::new(LOG_FILE_NAME);
    gman_engine::rotate_log_file(log_path)
        .with_context(|| format!("rotating {}", log_path.display()))?;

    let scratch_dir = Arc::new(
        ScratchDir::prepare(Path::new(SCRATCH_DIR_NAME))
            .with_context(|| format!("preparing {SCRATCH_DIR_NAME}"))?,
    );

    let clock = Arc::new(SystemClock);
    let built = gman_config::load(config_path, scratch_dir.clone(), clock)
        .map_err(|e| ExitError::config(e.to_string()))?;

    let _guard = logging::init(log_path, built.debug, verbose)?;

    tracing::info!(project = %config_path.display(), monitors = built.monitors.len(), "initializing");
    for monitor in &built.monitors {
        tracing::info!(monitor = %monitor.name(), "registered");
    }

    tracing::info!("running, press ctrl-c to exit");
    let supervisor = Supervisor::new(built.monitors);
    supervisor.run().await;

    tracing::info!("goodbye");
    Ok(())
}
