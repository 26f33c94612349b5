// SPDX-License-Identifier: MIT

//! Maps the error taxonomy in spec.md §7 to process exit codes.
//!
//! Configuration errors (missing `project`, unknown monitor type, empty
//! `on_events`, non-string env value, missing monitor field, or a missing
//! `-c/--config` flag) exit nonzero before the supervisor loop begins;
//! everything else that reaches `main` is also nonzero but carries no
//! special code of its own.

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    message: String,
}

impl ExitError {
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            code: 2,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
