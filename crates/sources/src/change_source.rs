// SPDX-License-Identifier: MIT

//! The `ChangeSource` abstraction: on demand, produce a `Snapshot` of
//! target fingerprints (spec.md §2, §4.2, §4.3).

use crate::error::SourceError;
use async_trait::async_trait;
use gman_core::{Fingerprint, Snapshot, Target};

/// Produces fingerprint snapshots for a fixed, pre-resolved set of
/// targets. Concrete variants are `FilesystemSource` and
/// `VersionControlSource`.
#[async_trait]
pub trait ChangeSource: Send + Sync {
    /// The resolved target list (frozen after target-resolution phase).
    fn targets(&self) -> &[Target];

    /// Take a new snapshot of every target's current fingerprint.
    async fn snapshot(&mut self) -> Result<Snapshot, SourceError>;

    /// A human-readable per-revision change log for a `modified` event on
    /// `target`, if this source kind supports one (spec.md §4.3 "Change
    /// logs"). `FilesystemSource` has no equivalent and uses the default
    /// `None`; `VersionControlSource` shells out to `svn log`.
    fn change_log(&self, _target: &Target, _before: &Fingerprint, _after: &Fingerprint) -> Option<String> {
        None
    }
}
