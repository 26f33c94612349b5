// SPDX-License-Identifier: MIT

//! The outer poll loop: tick every monitor, never let one monitor's
//! error abort the others, and shut down cleanly on Ctrl-C (spec.md §5).
//!
//! Grounded on the original's `main.run_loop`
//! (`examples/original_source/main.py`) and the teacher's
//! `daemon::main` signal-handling shape.

use crate::monitor::Monitor;
use std::time::Duration;

/// The poll interval between supervisor ticks (spec.md §5: "the
/// supervisor polls every monitor once per second").
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub struct Supervisor {
    monitors: Vec<Monitor>,
}

impl Supervisor {
    pub fn new(monitors: Vec<Monitor>) -> Self {
        Self { monitors }
    }

    /// Run until interrupted. Every monitor is ticked once per loop
    /// iteration; a monitor that errors is logged and left running for
    /// the next tick rather than aborting the whole supervisor.
    pub async fn run(mut self) {
        loop {
            for monitor in &mut self.monitors {
                if let Err(err) = monitor.tick().await {
                    tracing::error!(monitor = %monitor.name(), error = %err, "monitor tick failed");
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(TICK_INTERVAL) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown requested, killing running callbacks");
                    self.shutdown().await;
                    return;
                }
            }
        }
    }

    async fn shutdown(&mut self) {
        for monitor in &mut self.monitors {
            monitor.kill().await;
        }
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
