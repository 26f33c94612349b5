// SPDX-License-Identifier: MIT

//! Validates that every env map value is a string (spec.md §6 "Exit
//! codes"; SUPPLEMENTED FROM ORIGINAL SOURCE item 4).
//!
//! Grounded on `main.env_checker`
//! (`examples/original_source/main.py`), whose exact error message is
//! preserved verbatim.

use crate::error::ConfigError;
use std::collections::HashMap;

/// Convert a raw, JSON-typed env map into a `String -> String` map,
/// rejecting the first non-string value encountered.
pub fn check(raw: &HashMap<String, serde_json::Value>) -> Result<HashMap<String, String>, ConfigError> {
    let mut out = HashMap::with_capacity(raw.len());
    for (key, value) in raw {
        match value {
            serde_json::Value::String(s) => {
                out.insert(key.clone(), s.clone());
            }
            _ => return Err(ConfigError::NonStringEnv(key.clone())),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "env_checker_tests.rs"]
mod tests;
