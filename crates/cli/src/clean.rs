// SPDX-License-Identifier: MIT

//! `gman clean` — remove rotated scratch directories and log files from
//! the current working directory (spec.md §6, SUPPLEMENTED FROM ORIGINAL
//! SOURCE #2), grounded on the original's `helper("clean", ...)` scanning
//! `os.listdir("./")` for names starting with `LOGFILE`/`basename(TEMPDIR)`.
//!
//! Unlike the original, the *live* scratch directory and log file (the
//! exact names, with no rotation suffix) are left alone: `clean` targets
//! only past runs' rotated artifacts, not anything `run` may currently
//! have open.

use crate::{LOG_FILE_NAME, SCRATCH_DIR_NAME};
use anyhow::{Context, Result};

pub fn run() -> Result<()> {
    let cwd = std::env::current_dir().context("reading current directory")?;

    for entry in std::fs::read_dir(&cwd).context("reading current directory")? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if name == LOG_FILE_NAME || name == SCRATCH_DIR_NAME {
            continue;
        }

        if let Some(rest) = name.strip_prefix(LOG_FILE_NAME) {
            if rest.starts_with('.') {
                std::fs::remove_file(entry.path())
                    .with_context(|| format!("removing {}", entry.path().display()))?;
                println!("removed {name}");
            }
        } else if let Some(rest) = name.strip_prefix(SCRATCH_DIR_NAME) {
            if rest.starts_with('_') {
                std::fs::remove_dir_all(entry.path())
                    .with_context(|| format!("removing {}", entry.path().display()))?;
                println!("removed {name}");
            }
        }
    }

    Ok(())
}
