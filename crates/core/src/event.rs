// SPDX-License-Identifier: MIT

//! Typed change events produced by the Differ and consumed by the
//! EventRouter (spec.md §3, §4.4).

use crate::target::Target;
use std::fmt;

/// The kind of change a diff produced, or the `any` fallback fired by a
/// bare Scheduler (no ChangeSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Added,
    Removed,
    Modified,
    /// Fallback event kind: dispatched by a Scheduler on every tick, and by
    /// the EventRouter when no pipeline is bound for the actual kind.
    Any,
}

impl EventKind {
    pub const ANY_NAME: &'static str = "any";

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Added => "added",
            EventKind::Removed => "removed",
            EventKind::Modified => "modified",
            EventKind::Any => Self::ANY_NAME,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One produced change event: a kind plus the targets it affected.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub targets: Vec<Target>,
}

impl Event {
    pub fn new(kind: EventKind, targets: Vec<Target>) -> Self {
        Self { kind, targets }
    }
}
