// SPDX-License-Identifier: MIT

//! Error types owned by the core crate.

use thiserror::Error;

/// Errors raised while parsing a cron expression or `every ...` shorthand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("empty schedule expression")]
    Empty,
    #[error("invalid 'every' shorthand: {0:?}")]
    InvalidShorthand(String),
    #[error("invalid cron expression {0:?}: {1}")]
    InvalidCron(String, String),
}

/// Sentinel return code for a callback that failed to spawn at all (the
/// process could not be created, as opposed to exiting non-zero).
pub const EXECUTE_FAIL: i32 = 191;

/// Return code meaning success.
pub const SUCCESS: i32 = 0;
