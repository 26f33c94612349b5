// SPDX-License-Identifier: MIT

//! Process-wide scratch directory: callback log files live here, and the
//! directory itself is rotated (renamed with its previous mtime as a
//! suffix) at the start of every `run` (spec.md §5, §6 "Persisted state").
//!
//! Grounded on the original's `main.rename_files`
//! (`examples/original_source/main.py`).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    counter: AtomicU64,
}

impl ScratchDir {
    /// Rename an existing scratch directory (suffixing its mtime) and
    /// create a fresh, empty one at `path`.
    pub fn prepare(path: &Path) -> std::io::Result<Self> {
        if path.exists() {
            rotate(path)?;
        }
        std::fs::create_dir_all(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            counter: AtomicU64::new(0),
        })
    }

    /// Open the scratch directory for a read-only command (`list-targets`,
    /// `list-schedule`) that must build the same monitor graph as `run`
    /// but must not disturb a concurrently running supervisor's scratch
    /// directory: create it if missing, otherwise reuse it unrotated.
    pub fn ensure(path: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            counter: AtomicU64::new(0),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A fresh, uniquely named `.log` path under this directory, prefixed
    /// by the callback's log-safe basename (spec.md §5 "Shared resources").
    pub fn unique_log_path(&self, basename: &str) -> PathBuf {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        self.path
            .join(format!("{basename}_{}_{n}.log", std::process::id()))
    }
}

fn rotate(path: &Path) -> std::io::Result<()> {
    let mtime = std::fs::metadata(path)?
        .modified()?
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let dest = path.with_file_name(format!("{basename}_{mtime}"));
    std::fs::rename(path, dest)
}

/// Rotate a single fixed-name log file the same way, used for the
/// top-level supervisor log (spec.md §6 "Persisted state").
pub fn rotate_log_file(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let mtime = std::fs::metadata(path)?
        .modified()?
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let dest = path.with_extension(format!(
        "{}.{mtime}",
        path.extension().and_then(|e| e.to_str()).unwrap_or("log")
    ));
    std::fs::rename(path, dest)
}

#[cfg(test)]
#[path = "scratch_dir_tests.rs"]
mod tests;
