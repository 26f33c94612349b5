// SPDX-License-Identifier: MIT

//! Ties one schedule, optional change source, and event router together
//! (spec.md §4.1, §4.2, §4.4).
//!
//! Grounded on the original's `MonitorBase`/`FileMonitor`/`SvnMonitor`
//! (`examples/original_source/monitors/`).

use crate::error::SupervisorError;
use crate::router::EventRouter;
use gman_core::{Event, EventKind, HierName, Schedule, Snapshot, Target};
use gman_sources::ChangeSource;
use std::sync::Arc;

/// One monitor: a schedule, an optional change source, and the event
/// router that carries out whatever it diffs.
///
/// A monitor with no `source` is a bare scheduler: it fires a single
/// `any` event on every due tick instead of diffing snapshots (spec.md
/// §4.1 "Scheduler-only monitors").
pub struct Monitor {
    name: HierName,
    schedule: Schedule,
    source: Option<Box<dyn ChangeSource>>,
    router: EventRouter,
    previous_snapshot: Snapshot,
    clock: Arc<dyn gman_core::Clock>,
}

impl Monitor {
    pub fn new(
        name: HierName,
        schedule: Schedule,
        source: Option<Box<dyn ChangeSource>>,
        router: EventRouter,
        clock: Arc<dyn gman_core::Clock>,
    ) -> Self {
        Self {
            name,
            schedule,
            source,
            router,
            previous_snapshot: Snapshot::new(),
            clock,
        }
    }

    pub fn name(&self) -> &HierName {
        &self.name
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn targets(&self) -> &[Target] {
        match &self.source {
            Some(source) => source.targets(),
            None => &[],
        }
    }

    /// Advance any in-flight callback pipelines, then fire if due and
    /// idle (spec.md §4.1: a monitor never starts a new run while the
    /// previous one is still executing).
    pub async fn tick(&mut self) -> Result<(), SupervisorError> {
        self.router.poll_step().await;

        if self.router.is_done() && self.schedule.is_due(self.clock.now()) {
            self.schedule.fire()?;
            self.fire().await?;
        }

        Ok(())
    }

    async fn fire(&mut self) -> Result<(), SupervisorError> {
        match &mut self.source {
            Some(source) => {
                let snapshot = source.snapshot().await?;
                let events = gman_core::diff(&self.previous_snapshot, &snapshot);
                for event in &events {
                    log_verbose(&self.name, event, &self.previous_snapshot, &snapshot, source.as_ref());
                }
                self.previous_snapshot = snapshot;
                for event in &events {
                    self.router.on(event).await;
                }
            }
            None => {
                self.router.on(&Event::new(EventKind::Any, vec![])).await;
            }
        }
        Ok(())
    }

    /// Kill all running callbacks (graceful shutdown).
    pub async fn kill(&mut self) {
        self.router.kill().await;
    }
}

/// One human-readable summary line per changed target, e.g. `"[MODIFIED]
/// path"` (SPEC_FULL.md supplement 3, ported from the original's
/// `MonitorBase.verbose`/`SvnMonitor.verbose`). For a VCS `modified`
/// event, additionally logs the source's per-revision change log, if any.
fn log_verbose(name: &HierName, event: &Event, before: &Snapshot, after: &Snapshot, source: &dyn ChangeSource) {
    let tag = event.kind.as_str().to_ascii_uppercase();
    for target in &event.targets {
        tracing::info!(monitor = %name, "[{tag}] {target}");

        if event.kind != EventKind::Modified {
            continue;
        }
        if let (Some(before_fp), Some(after_fp)) = (before.get(target), after.get(target)) {
            if let Some(log) = source.change_log(target, before_fp, after_fp) {
                tracing::info!(monitor = %name, "    log = {log}");
            }
        }
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
