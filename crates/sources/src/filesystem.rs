// SPDX-License-Identifier: MIT

//! `FilesystemSource`: snapshots a set of resolved filesystem targets by
//! modification time (spec.md §4.2).
//!
//! Ported from the original's `monitors.FileMonitor`
//! (`examples/original_source/monitors/FileMonitor.py`), with target
//! resolution (glob/filelist/ignores/env) performed once up front rather
//! than filtered lazily on every poll.

use crate::change_source::ChangeSource;
use crate::error::{SourceError, TargetError};
use crate::filelist;
use crate::glob;
use crate::ignore::IgnoreSet;
use async_trait::async_trait;
use gman_core::{Fingerprint, Snapshot, Target};
use std::path::{Path, PathBuf};

/// Watches a list of target patterns on the local filesystem, fingerprinting
/// each resolved file by modification time.
#[derive(Debug)]
pub struct FilesystemSource {
    targets: Vec<Target>,
    recursive: bool,
    extensions: Option<Vec<String>>,
}

impl FilesystemSource {
    /// Resolve `patterns` (with env substitution, `-f`/`-F` filelist
    /// redirection, glob expansion, and `ignores` filtering) into a frozen
    /// target list.
    pub fn new(
        patterns: &[String],
        ignores: &[String],
        recursive: bool,
        extensions: Option<Vec<String>>,
    ) -> Result<Self, TargetError> {
        let resolved = resolve_patterns(patterns, ignores)?;
        let targets = resolved.into_iter().map(|p| Target::new(p, false)).collect();
        Ok(Self {
            targets,
            recursive,
            extensions,
        })
    }

    fn endswith(&self, name: &str) -> bool {
        match &self.extensions {
            None => true,
            Some(exts) => exts.iter().any(|ext| name.ends_with(ext.as_str())),
        }
    }

    fn gather_into(&self, target: &Target, out: &mut Snapshot) -> Result<(), SourceError> {
        let path = target.path();
        let metadata = match std::fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(_) => return Ok(()), // target vanished between resolution and poll
        };

        if metadata.is_dir() {
            if self.recursive {
                self.walk_recursive(path, out)?;
            } else {
                self.list_children(path, out)?;
            }
        } else {
            // file or symlink
            let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if self.endswith(file_name) {
                insert_mtime(out, target.clone(), path)?;
            }
        }
        Ok(())
    }

    fn list_children(&self, dir: &Path, out: &mut Snapshot) -> Result<(), SourceError> {
        let entries = std::fs::read_dir(dir).map_err(|e| SourceError::Io(dir.to_path_buf(), e))?;
        for entry in entries.flatten() {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }
            let path = entry.path();
            if path.is_file() && self.endswith(&name.to_string_lossy()) {
                insert_mtime(out, Target::new(path.clone(), false), &path)?;
            }
        }
        Ok(())
    }

    fn walk_recursive(&self, dir: &Path, out: &mut Snapshot) -> Result<(), SourceError> {
        let entries = std::fs::read_dir(dir).map_err(|e| SourceError::Io(dir.to_path_buf(), e))?;
        let mut subdirs = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }
            let path = entry.path();
            if path.is_dir() {
                subdirs.push(path);
            } else if path.is_file() && self.endswith(&name.to_string_lossy()) {
                insert_mtime(out, Target::new(path.clone(), false), &path)?;
            }
        }
        for sub in subdirs {
            self.walk_recursive(&sub, out)?;
        }
        Ok(())
    }
}

/// Expand env substitution, filelist redirection, glob expansion, and
/// `ignores` filtering for a raw pattern list, producing a sorted,
/// deduplicated absolute path list. Shared by `FilesystemSource` and the
/// svn target resolver in `gman-config` (spec.md §4.2, §4.3).
pub fn resolve_patterns(patterns: &[String], ignores: &[String]) -> Result<Vec<PathBuf>, TargetError> {
    let ignore_set = IgnoreSet::new(ignores.to_vec());
    let mut flat_patterns = Vec::new();
    for pattern in patterns {
        let substituted = filelist::expand_env(pattern);
        if let Some(path) = filelist::redirection_target(&substituted) {
            flat_patterns.extend(filelist::read(path)?);
        } else {
            flat_patterns.push(substituted);
        }
    }

    let mut resolved: Vec<PathBuf> = Vec::new();
    for pattern in &flat_patterns {
        let matches = glob::expand(pattern, false);
        if matches.is_empty() {
            tracing::error!(pattern = %pattern, "the path doesn't exist");
            continue;
        }
        for m in matches {
            let absolute = absolutize(&m);
            if !ignore_set.matches(&absolute) {
                resolved.push(absolute);
            }
        }
    }
    resolved.sort();
    resolved.dedup();
    Ok(resolved)
}

fn insert_mtime(out: &mut Snapshot, target: Target, path: &Path) -> Result<(), SourceError> {
    let metadata = std::fs::metadata(path).map_err(|e| SourceError::Io(path.to_path_buf(), e))?;
    let mtime = metadata
        .modified()
        .map_err(|e| SourceError::Io(path.to_path_buf(), e))?
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    out.insert(target, Fingerprint::Mtime(mtime));
    Ok(())
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

#[async_trait]
impl ChangeSource for FilesystemSource {
    fn targets(&self) -> &[Target] {
        &self.targets
    }

    async fn snapshot(&mut self) -> Result<Snapshot, SourceError> {
        let mut snapshot = Snapshot::new();
        for target in self.targets.clone() {
            self.gather_into(&target, &mut snapshot)?;
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
#[path = "filesystem_tests.rs"]
mod tests;
