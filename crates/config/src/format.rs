// SPDX-License-Identifier: MIT

//! Format detection and dispatch across the four accepted config
//! syntaxes (SPEC_FULL.md §6.1).
//!
//! Grounded on the teacher's `runbook::parser::Format` + `find.rs`'s
//! extension-based dispatch, extended with a content-sniff fallback for
//! the unlabeled/default "YAML-like" case spec.md §6 describes.

use crate::error::ConfigError;
use crate::raw::RawConfig;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Hcl,
    Yaml,
}

impl Format {
    /// Detect a format from a file's extension, falling back to content
    /// sniffing (a leading `{` implies JSON/HCL-as-braces, otherwise
    /// YAML is assumed as the catch-all "structured document" form).
    pub fn detect(path: &Path, content: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Format::Toml,
            Some("json") => Format::Json,
            Some("hcl") => Format::Hcl,
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => sniff(content),
        }
    }
}

fn sniff(content: &str) -> Format {
    let trimmed = content.trim_start();
    if trimmed.starts_with('{') {
        Format::Json
    } else {
        Format::Yaml
    }
}

pub fn parse(content: &str, format: Format) -> Result<RawConfig, ConfigError> {
    Ok(match format {
        Format::Toml => toml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
        Format::Hcl => hcl::from_str(content)?,
    })
}
