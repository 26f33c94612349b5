// SPDX-License-Identifier: MIT

//! Errors owned by the engine crate (spec.md §7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("failed to spawn {argv:?}: {source}")]
    Spawn {
        argv: Vec<String>,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create log file for {basename:?}: {source}")]
    LogFile {
        basename: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error(transparent)]
    Source(#[from] gman_sources::SourceError),
    #[error(transparent)]
    Schedule(#[from] gman_core::ScheduleError),
    #[error(transparent)]
    Execute(#[from] ExecuteError),
}
