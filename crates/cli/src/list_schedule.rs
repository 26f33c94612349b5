// SPDX-License-Identifier: MIT

//! `gman list-schedule [name]` — print the next five scheduled fire
//! times per monitor (spec.md §6, SUPPLEMENTED FROM ORIGINAL SOURCE #1),
//! grounded on the original's `helper("list-schedule", ...)`
//! (`range(5)` calling `schedule_next_run`).

use crate::SCRATCH_DIR_NAME;
use anyhow::{Context, Result};
use gman_core::SystemClock;
use gman_engine::ScratchDir;
use std::path::Path;
use std::sync::Arc;

/// Number of upcoming fire times printed per monitor, pinned as a named
/// constant rather than the original's bare `range(5)`.
const UPCOMING_COUNT: usize = 5;

pub fn run(config_path: &Path, name: Option<&str>) -> Result<()> {
    let scratch_dir = Arc::new(ScratchDir::ensure(Path::new(SCRATCH_DIR_NAME))?);
    let clock = Arc::new(SystemClock);
    let built = gman_config::load(config_path, scratch_dir, clock)?;

    for monitor in &built.monitors {
        if let Some(filter) = name {
            if monitor.name().basename() != filter {
                continue;
            }
        }

        println!("{}", monitor.name());
        let upcoming = monitor
            .schedule()
            .upcoming(UPCOMING_COUNT)
            .with_context(|| format!("computing upcoming fire times for {}", monitor.name()))?;
        for fire_time in upcoming {
            println!("  {}", fire_time.with_timezone(&chrono::Local));
        }
    }

    Ok(())
}
