// SPDX-License-Identifier: MIT

//! Errors raised while resolving targets or taking a snapshot (spec.md §4.2, §4.3, §7).

use std::path::PathBuf;
use thiserror::Error;

/// Maximum filelist recursion depth before a `-f`/`-F` chain is treated as
/// a (likely self-referential) cycle (spec.md §8 property 3, SPEC_FULL.md
/// supplement 6).
pub const MAX_FILELIST_DEPTH: usize = 128;

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("the path doesn't exist: {0}")]
    NotFound(PathBuf),

    #[error("the path is not under version control: {0}")]
    Unversioned(PathBuf),

    #[error("the file '{0}' does not exist{1}")]
    FilelistMissing(PathBuf, String),

    #[error("filelist recursion exceeded {MAX_FILELIST_DEPTH} levels starting at {0}")]
    FilelistTooDeep(PathBuf),

    #[error("invalid regex translated from glob/ignore pattern {0:?}: {1}")]
    BadPattern(String, regex::Error),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("failed to invoke {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("failed to parse svn status xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error reading {0}: {1}")]
    Io(PathBuf, std::io::Error),
}
