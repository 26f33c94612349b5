// SPDX-License-Identifier: MIT

//! `gman list-targets [name]` — print each monitor's name and resolved
//! targets (spec.md §6), grounded on the original's `helper("list-targets", ...)`.

use crate::SCRATCH_DIR_NAME;
use anyhow::Result;
use gman_core::SystemClock;
use gman_engine::ScratchDir;
use std::path::Path;
use std::sync::Arc;

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
        for target in monitor.targets() {
            println!("  {target}");
        }
    }

    Ok(())
}
