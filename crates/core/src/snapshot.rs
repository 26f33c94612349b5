// SPDX-License-Identifier: MIT

//! A full fingerprint map taken at one polling instant (spec.md §3).

use crate::target::Target;
use std::collections::HashMap;

/// The per-target fingerprint used to detect change between two polls: a
/// modification time for filesystem targets, or a revision string for
/// version-controlled targets.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Fingerprint {
    /// Filesystem modification time, as seconds since the Unix epoch
    /// (matching the original's `os.path.getmtime` float-seconds semantics).
    Mtime(f64),
    /// A version-control revision identifier (e.g. an svn revision number
    /// as a string). `None`/`-1`/empty revisions are omitted from the
    /// snapshot entirely rather than represented here (spec.md §4.3).
    Revision(String),
}

/// A `Target -> Fingerprint` map. Replaces the previous snapshot atomically
/// after a diff has been fully consumed (spec.md §3 invariant).
pub type Snapshot = HashMap<Target, Fingerprint>;
