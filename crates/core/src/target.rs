// SPDX-License-Identifier: MIT

//! A single watched path, resolved once at initialization (spec.md §3).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An absolute path under watch, plus whether it is known to live inside a
/// version-controlled working copy.
///
/// Target lists are resolved once at initialization and never change during
/// the process lifetime (spec.md §3 invariant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Target {
    path: PathBuf,
    under_version_control: bool,
}

impl Target {
    pub fn new(path: impl Into<PathBuf>, under_version_control: bool) -> Self {
        Self {
            path: path.into(),
            under_version_control,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn under_version_control(&self) -> bool {
        self.under_version_control
    }

    pub fn display(&self) -> std::path::Display<'_> {
        self.path.display()
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
