// SPDX-License-Identifier: MIT

//! `VersionControlSource`: snapshots a set of svn working-copy targets by
//! revision (spec.md §4.3).
//!
//! Ported from the original's `monitors.SvnMonitor`
//! (`examples/original_source/monitors/SvnMonitor.py`): `svn_st`/`svn_up`/
//! `svn_log`, XML status parsing, and the "carry forward the previous
//! fingerprint while locked" rule that prevents event storms during
//! in-flight commits.

use crate::change_source::ChangeSource;
use crate::error::SourceError;
use async_trait::async_trait;
use gman_core::{Fingerprint, Snapshot, Target};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// One `wc-status` entry parsed out of `svn status --xml`.
#[derive(Debug, Default)]
struct StatusEntry {
    item: Option<String>,
    wc_locked: bool,
    revision: Option<String>,
}

/// Watches a list of svn working-copy targets, fingerprinting each by its
/// last-committed revision.
#[derive(Debug)]
pub struct VersionControlSource {
    targets: Vec<Target>,
    depth: String,
    previous: HashMap<PathBuf, String>,
    has_polled_once: bool,
}

impl VersionControlSource {
    /// Validate each target (`svn status --depth empty --verbose`); any
    /// target reported `unversioned` is dropped with an error log
    /// (spec.md §4.3 "Target validation").
    pub fn new(targets: &[PathBuf], depth: &str) -> Self {
        let mut kept = Vec::new();
        for target in targets {
            match status(target, &["--depth", "empty", "--verbose"]) {
                Ok(entries) => match entries.first() {
                    Some(entry) if entry.item.as_deref() == Some("unversioned") => {
                        tracing::error!(target = %target.display(), "the path is not under version control");
                    }
                    _ => kept.push(Target::new(target.clone(), true)),
                },
                Err(err) => {
                    tracing::error!(target = %target.display(), error = %err, "failed to query svn status");
                }
            }
        }
        Self {
            targets: kept,
            depth: depth.to_string(),
            previous: HashMap::new(),
            has_polled_once: false,
        }
    }

    /// Produce a human-readable per-revision log for a `modified` event
    /// (spec.md §4.3 "Change logs").
    pub fn log_between(&self, target: &Path, before: &str, after: &str) -> Result<String, SourceError> {
        let before_next = before.parse::<i64>().unwrap_or(0) + 1;
        let revision_range = format!("{after}:{before_next}");
        let (stdout, _stderr, _status) = run_svn(
            &["log", &target.display().to_string(), "--revision", &revision_range, "--verbose"],
            None,
        )?;
        Ok(stdout)
    }
}

#[async_trait]
impl ChangeSource for VersionControlSource {
    fn targets(&self) -> &[Target] {
        &self.targets
    }

    async fn snapshot(&mut self) -> Result<Snapshot, SourceError> {
        let mut out = Snapshot::new();
        for target in self.targets.clone() {
            let path = target.path().to_path_buf();

            if self.has_polled_once {
                // Best-effort update; failures (including a locked working
                // copy) leave the previous fingerprint untouched below.
                let _ = run_svn(&["up", &path.display().to_string(), "--quiet"], None);
            }

            let entries = status(
                &path,
                &["--quiet", "--verbose", "--show-updates", "--depth", &self.depth],
            )?;
            let Some(entry) = entries.into_iter().next() else {
                continue;
            };

            if entry.wc_locked {
                if let Some(prev) = self.previous.get(&path) {
                    out.insert(target, Fingerprint::Revision(prev.clone()));
                }
                continue;
            }

            match entry.revision {
                Some(revision) if !revision.is_empty() && revision != "-1" => {
                    self.previous.insert(path, revision.clone());
                    out.insert(target, Fingerprint::Revision(revision));
                }
                _ => {}
            }
        }
        self.has_polled_once = true;
        Ok(out)
    }

    /// Produce the `svn log --revision a:b+1 --verbose` summary for a
    /// `modified` event (spec.md §4.3 "Change logs"). Only meaningful
    /// between two revision fingerprints; any other pairing yields `None`.
    fn change_log(&self, target: &Target, before: &Fingerprint, after: &Fingerprint) -> Option<String> {
        let (Fingerprint::Revision(before_rev), Fingerprint::Revision(after_rev)) = (before, after) else {
            return None;
        };
        match self.log_between(target.path(), before_rev, after_rev) {
            Ok(log) => Some(log),
            Err(err) => {
                tracing::error!(target = %target.display(), error = %err, "failed to produce svn change log");
                None
            }
        }
    }
}

fn status(target: &Path, options: &[&str]) -> Result<Vec<StatusEntry>, SourceError> {
    let mut args = vec!["st".to_string(), "--xml".to_string(), target.display().to_string()];
    args.extend(options.iter().map(|s| s.to_string()));
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let (stdout, _stderr, _status) = run_svn(&arg_refs, None)?;
    parse_status_xml(&stdout)
}

/// Run an svn subcommand, appending `--non-interactive`, capturing
/// stdout/stderr into named temporary files (spec.md §4.3 "Command
/// execution"). Logs the command line and stderr on non-zero exit.
fn run_svn(args: &[&str], cwd: Option<&Path>) -> Result<(String, String, i32), SourceError> {
    let mut argv: Vec<&str> = args.to_vec();
    argv.push("--non-interactive");
    let command_line = format!("svn {}", argv.join(" "));

    let stdout_file = tempfile::Builder::new()
        .prefix("SvnMonitor_stdout_")
        .suffix(".log")
        .tempfile()
        .map_err(|e| SourceError::Spawn { command: command_line.clone(), source: e })?;
    let stderr_file = tempfile::Builder::new()
        .prefix("SvnMonitor_stderr_")
        .suffix(".log")
        .tempfile()
        .map_err(|e| SourceError::Spawn { command: command_line.clone(), source: e })?;

    let mut cmd = Command::new("svn");
    cmd.args(&argv);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd.stdout(Stdio::from(
        stdout_file
            .reopen()
            .map_err(|e| SourceError::Spawn { command: command_line.clone(), source: e })?,
    ));
    cmd.stderr(Stdio::from(
        stderr_file
            .reopen()
            .map_err(|e| SourceError::Spawn { command: command_line.clone(), source: e })?,
    ));

    let status = cmd
        .status()
        .map_err(|e| SourceError::Spawn { command: command_line.clone(), source: e })?;

    let stdout = std::fs::read_to_string(stdout_file.path()).unwrap_or_default();
    let stderr = std::fs::read_to_string(stderr_file.path()).unwrap_or_default();

    if !status.success() {
        tracing::error!(command = %command_line, stderr = %stderr, "svn command failed");
    }

    Ok((stdout, stderr, status.code().unwrap_or(-1)))
}

fn parse_status_xml(xml: &str) -> Result<Vec<StatusEntry>, SourceError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut entries = Vec::new();
    let mut current: Option<StatusEntry> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(XmlEvent::Start(e)) | Ok(XmlEvent::Empty(e)) => {
                match e.local_name().as_ref() {
                    b"entry" => {
                        current = Some(StatusEntry::default());
                    }
                    b"wc-status" => {
                        if let Some(cur) = current.as_mut() {
                            for attr in e.attributes().flatten() {
                                match attr.key.local_name().as_ref() {
                                    b"item" => {
                                        cur.item =
                                            Some(attr.unescape_value().unwrap_or_default().to_string());
                                    }
                                    b"wc-locked" => {
                                        cur.wc_locked = attr
                                            .unescape_value()
                                            .map(|v| v == "true")
                                            .unwrap_or(false);
                                    }
                                    _ => {}
                                }
                            }
                        }
                    }
                    b"commit" => {
                        if let Some(cur) = current.as_mut() {
                            for attr in e.attributes().flatten() {
                                if attr.key.local_name().as_ref() == b"revision" {
                                    cur.revision =
                                        Some(attr.unescape_value().unwrap_or_default().to_string());
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(XmlEvent::End(e)) => {
                if e.local_name().as_ref() == b"entry" {
                    if let Some(cur) = current.take() {
                        entries.push(cur);
                    }
                }
            }
            Ok(XmlEvent::Eof) => break,
            Err(err) => return Err(SourceError::Xml(err)),
            _ => {}
        }
        buf.clear();
    }
    Ok(entries)
}

#[cfg(test)]
#[path = "vcs_tests.rs"]
mod tests;
