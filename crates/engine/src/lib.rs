// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gman-engine: orchestration and execution.
//!
//! Spawns callbacks into real processes or detached tasks, runs the
//! fork/join callback pipelines that a diffed event triggers, routes
//! events to their pipeline (plus `on_error`/`on_success` handlers), and
//! ties a schedule/source/router together into a Monitor polled by the
//! outer Supervisor loop (spec.md §4.1, §4.4, §4.5, §5).

pub mod error;
pub mod executor;
pub mod monitor;
pub mod pipeline;
pub mod router;
pub mod scratch_dir;
pub mod supervisor;
pub mod worker;

pub use error::{ExecuteError, SupervisorError};
pub use monitor::Monitor;
pub use pipeline::{CallbackPipeline, PipelineEvent};
pub use router::EventRouter;
pub use scratch_dir::{rotate_log_file, ScratchDir};
pub use supervisor::Supervisor;
pub use worker::{FailedWorker, ProcessWorker, TaskWorker, Worker};
