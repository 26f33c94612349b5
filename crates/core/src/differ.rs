// SPDX-License-Identifier: MIT

//! Pure snapshot-to-events diff (spec.md §4.4).

use crate::event::{Event, EventKind};
use crate::snapshot::Snapshot;

/// Diff two snapshots into at most three typed events (`added`, `removed`,
/// `modified`), each yielded only if non-empty. Order is unspecified;
/// callers must tolerate any ordering (spec.md §4.4).
///
/// # Totality (spec.md §8 property 1)
///
/// The three event target sets are pairwise disjoint and their union
/// covers exactly the symmetric difference of the key sets, plus any key
/// present in both whose fingerprint changed.
pub fn diff(before: &Snapshot, after: &Snapshot) -> Vec<Event> {
    let mut added = Vec::new();
    let mut removed = Vec::new();
    let mut modified = Vec::new();

    for (target, after_fp) in after {
        match before.get(target) {
            None => added.push(target.clone()),
            Some(before_fp) if before_fp != after_fp => modified.push(target.clone()),
            Some(_) => {}
        }
    }
    for target in before.keys() {
        if !after.contains_key(target) {
            removed.push(target.clone());
        }
    }

    let mut events = Vec::with_capacity(3);
    if !added.is_empty() {
        events.push(Event::new(EventKind::Added, added));
    }
    if !removed.is_empty() {
        events.push(Event::new(EventKind::Removed, removed));
    }
    if !modified.is_empty() {
        events.push(Event::new(EventKind::Modified, modified));
    }
    events
}

#[cfg(test)]
#[path = "differ_tests.rs"]
mod tests;
