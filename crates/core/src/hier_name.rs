// SPDX-License-Identifier: MIT

//! Hierarchical identifiers: `project/job[/event[/step]]`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A slash-joined hierarchical identifier used to correlate log lines,
/// callbacks, and join labels across the project/job/event/step levels.
///
/// Names are opaque strings joined by a single `/` separator. Ordering
/// within a name is insertion order and is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HierName(String);

impl HierName {
    /// Construct a root-level name (no parent).
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Join a child name onto this one: `self/child`.
    pub fn join(&self, child: impl AsRef<str>) -> Self {
        Self(format!("{}/{}", self.0, child.as_ref()))
    }

    /// The full dotted/slashed path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The final path component (the "basename"), used when matching join
    /// labels against a callback's hierarchical name.
    pub fn basename(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for HierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HierName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for HierName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
#[path = "hier_name_tests.rs"]
mod tests;
