// SPDX-License-Identifier: MIT

//! Structured logging setup (SPEC_FULL.md §6.2).
//!
//! Grounded on the teacher's `daemon::main::setup_logging`
//! (`tracing_subscriber::fmt` + `tracing_appender` non-blocking file
//! layer + `EnvFilter`), adapted so the log file is rotated by rename
//! before the process starts writing to it (spec.md §6 "Persisted
//! state"), rather than relying on built-in rolling.

use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr + rotated-file subscriber. `debug` mirrors the
/// config's `debug: bool`; `verbose` (the CLI's `-v`) forces debug
/// regardless of the config. `RUST_LOG` always takes priority over both.
pub fn init(log_path: &Path, debug: bool, verbose: bool) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("invalid log path: {}", log_path.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if debug || verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}
