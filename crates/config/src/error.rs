// SPDX-License-Identifier: MIT

//! Configuration errors (spec.md §7 "Configuration error").

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HCL parse error: {0}")]
    Hcl(#[from] hcl::Error),

    #[error("environment variable only can be string type: {0}")]
    NonStringEnv(String),

    #[error("job {job:?}: invalid command line {cmd:?}: {source}")]
    InvalidCommand {
        job: String,
        cmd: String,
        #[source]
        source: shell_words::ParseError,
    },

    #[error("job {0:?}: a callback cannot set both fork and join")]
    ForkJoinConflict(String),

    #[error("job {0:?}: unknown monitor type {1:?} (expected \"file\", \"svn\", or empty)")]
    UnknownMonitorType(String, String),

    #[error("job {0:?}: monitor type {1:?} requires at least one target")]
    MissingTargets(String, String),

    #[error("job {job:?}: {source}")]
    Target {
        job: String,
        #[source]
        source: gman_sources::TargetError,
    },

    #[error("job {0:?}: on_events must define at least one callback")]
    EmptyOnEvents(String),

    #[error("job {job:?}: invalid schedule {schedule:?}: {source}")]
    InvalidSchedule {
        job: String,
        schedule: String,
        #[source]
        source: gman_core::ScheduleError,
    },

    #[error("job {0:?}: unknown event kind {1:?} (expected added/removed/modified/any)")]
    UnknownEventKind(String, String),

    #[error("config is missing required field \"project\"")]
    MissingProject,
}
