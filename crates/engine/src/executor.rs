// SPDX-License-Identifier: MIT

//! Spawns a `Callback` into a `Worker`, capturing combined stdout+stderr
//! into a scratch-dir log file (spec.md §4.5).
//!
//! Grounded on the original's `event.CallBack._run_os_cmd`/`_run_func`/
//! `communicate` (`examples/original_source/event/event.py`).

use crate::scratch_dir::ScratchDir;
use crate::worker::{FailedWorker, ProcessWorker, TaskWorker, Worker};
use gman_core::callback::Command;
use gman_core::error::{EXECUTE_FAIL, SUCCESS};
use gman_core::Callback;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// The result of launching one callback: its worker plus the log file it
/// is writing to, if any.
pub struct Spawned {
    pub worker: Box<dyn Worker>,
    pub log_path: Option<PathBuf>,
}

/// Launch `callback`, returning a `Worker` that can be polled/killed.
/// Spawn failure never propagates as an `Err`: it is logged and
/// represented as an already-failed worker reporting `EXECUTE_FAIL`
/// (spec.md §7 "Callback spawn failure").
pub async fn spawn(callback: &Callback, scratch_dir: &ScratchDir) -> Spawned {
    match &callback.command {
        Command::Function(f) => Spawned {
            worker: Box::new(TaskWorker::spawn(f.clone())),
            log_path: None,
        },
        Command::Argv(argv) => spawn_argv(callback, argv, scratch_dir),
    }
}

fn spawn_argv(callback: &Callback, argv: &[String], scratch_dir: &ScratchDir) -> Spawned {
    let Some((program, args)) = argv.split_first() else {
        tracing::error!(name = %callback.name, "empty command, nothing to execute");
        return Spawned {
            worker: Box::new(FailedWorker),
            log_path: None,
        };
    };

    let log_path = scratch_dir.unique_log_path(&callback.log_basename());
    let log_file = match std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)
    {
        Ok(f) => f,
        Err(err) => {
            tracing::error!(name = %callback.name, error = %err, "failed to create callback log file");
            return Spawned {
                worker: Box::new(FailedWorker),
                log_path: None,
            };
        }
    };
    let stderr_file = match log_file.try_clone() {
        Ok(f) => f,
        Err(err) => {
            tracing::error!(name = %callback.name, error = %err, "failed to clone callback log file handle");
            return Spawned {
                worker: Box::new(FailedWorker),
                log_path: Some(log_path),
            };
        }
    };

    let mut command = TokioCommand::new(program);
    command.args(args);
    command.envs(callback.env.iter());
    if let Some(cwd) = &callback.cwd {
        command.current_dir(cwd);
    }
    command.stdout(Stdio::from(log_file));
    command.stderr(Stdio::from(stderr_file));

    match command.spawn() {
        Ok(child) => {
            tracing::info!(name = %callback.name, cmd = %argv.join(" "), log = %log_path.display(), "invoked");
            Spawned {
                worker: Box::new(ProcessWorker::new(child)),
                log_path: Some(log_path),
            }
        }
        Err(err) => {
            tracing::error!(name = %callback.name, cmd = %argv.join(" "), error = %err, "failed to execute command");
            Spawned {
                worker: Box::new(FailedWorker),
                log_path: Some(log_path),
            }
        }
    }
}

/// Run a callback to completion synchronously, bounded by its configured
/// timeout; used for `on_error`/`on_success` handlers (spec.md §4.5
/// "Timeouts"). Returns the return code, or `EXECUTE_FAIL` on timeout.
pub async fn communicate(callback: &Callback, scratch_dir: &ScratchDir) -> i32 {
    let mut spawned = spawn(callback, scratch_dir).await;
    let deadline = tokio::time::Instant::now() + callback.timeout;
    loop {
        if let Some(code) = spawned.worker.poll().await {
            return code;
        }
        if tokio::time::Instant::now() >= deadline {
            tracing::error!(
                name = %callback.name,
                timeout_secs = callback.timeout.as_secs(),
                "handler timed out"
            );
            spawned.worker.kill().await;
            return EXECUTE_FAIL;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
}

pub fn is_success(code: i32) -> bool {
    code == SUCCESS
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
