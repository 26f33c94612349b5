// SPDX-License-Identifier: MIT

//! The serde-derived configuration schema, shared verbatim across all
//! four accepted syntaxes (spec.md §6, SPEC_FULL.md §6.1).

use serde::Deserialize;
use std::collections::HashMap;

fn default_depth() -> String {
    "empty".to_string()
}

/// The top-level document.
#[derive(Debug, Deserialize)]
pub struct RawConfig {
    pub project: Option<String>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub env: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub jobs: HashMap<String, RawJob>,
}

#[derive(Debug, Deserialize)]
pub struct RawJob {
    #[serde(default)]
    pub monitor: RawMonitor,
    #[serde(default)]
    pub job_config: RawJobConfig,
    #[serde(default)]
    pub on_events: HashMap<String, Vec<RawCallback>>,
    #[serde(default)]
    pub on_error: Option<RawCallback>,
    #[serde(default)]
    pub on_success: Option<RawCallback>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawMonitor {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default = "default_depth")]
    pub depth: String,
    #[serde(default)]
    pub ignores: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawJobConfig {
    #[serde(default)]
    pub env: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub continue_on_error: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCallback {
    pub name: String,
    pub cmd: String,
    #[serde(default)]
    pub env: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub join: Option<String>,
}
