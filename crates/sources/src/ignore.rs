// SPDX-License-Identifier: MIT

//! `ignores` glob-pattern filter (fnmatch semantics over the full path
//! string, spec.md §4.2).

use crate::glob::translate;
use std::path::Path;

/// Compiled `ignores` list: a target is dropped if its path string
/// matches any pattern.
#[derive(Debug, Default, Clone)]
pub struct IgnoreSet {
    patterns: Vec<String>,
}

impl IgnoreSet {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    pub fn matches(&self, path: &Path) -> bool {
        let s = path.to_string_lossy();
        self.patterns.iter().any(|pat| {
            translate(pat)
                .map(|re| re.is_match(&s))
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
#[path = "ignore_tests.rs"]
mod tests;
