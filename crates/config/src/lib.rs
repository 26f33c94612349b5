// SPDX-License-Identifier: MIT

//! Parses and builds the runtime monitor graph from a configuration
//! document in any of the four accepted syntaxes (spec.md §6).

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod build;
pub mod env_checker;
pub mod error;
pub mod format;
pub mod raw;

use std::path::Path;
use std::sync::Arc;

pub use build::BuiltConfig;
pub use error::ConfigError;
pub use format::Format;
pub use raw::RawConfig;

/// Read and parse a configuration file, then build its monitor graph.
///
/// `scratch_dir` should already be `prepare()`d; `clock` drives every
/// monitor's schedule evaluation and is normally `SystemClock`.
pub fn load(
    path: &Path,
    scratch_dir: Arc<gman_engine::ScratchDir>,
    clock: Arc<dyn gman_core::Clock>,
) -> Result<BuiltConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let format = Format::detect(path, &content);
    let raw = format::parse(&content, format)?;
    build::build(raw, scratch_dir, clock)
}
