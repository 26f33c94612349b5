// SPDX-License-Identifier: MIT

//! Routes diffed change events to their callback pipeline, and runs the
//! `on_error`/`on_success` handlers once a pipeline finishes (spec.md
//! §4.4, §4.6).
//!
//! Grounded on the original's `Event.fire`/`_error_handle`
//! (`examples/original_source/event/event.py`), generalized to also fire
//! an `on_success` handler (the original never does).

use crate::executor;
use crate::pipeline::{CallbackPipeline, PipelineEvent};
use crate::scratch_dir::ScratchDir;
use gman_core::{Callback, Event, EventKind};
use std::collections::HashMap;
use std::sync::Arc;

/// The environment variable an error handler sees naming which event
/// kind's pipeline failed (spec.md §4.6).
pub const EVENT_NAME_VAR: &str = "__EVENT_NAME__";

/// One monitor's full set of event-kind pipelines plus its optional
/// `on_error`/`on_success` handlers.
pub struct EventRouter {
    pipelines: HashMap<EventKind, CallbackPipeline>,
    error_handler: Option<Callback>,
    success_handler: Option<Callback>,
    scratch_dir: Arc<ScratchDir>,
}

impl EventRouter {
    pub fn new(
        pipelines: HashMap<EventKind, CallbackPipeline>,
        error_handler: Option<Callback>,
        success_handler: Option<Callback>,
        scratch_dir: Arc<ScratchDir>,
    ) -> Self {
        Self {
            pipelines,
            error_handler,
            success_handler,
            scratch_dir,
        }
    }

    /// Dispatch one diffed event to its matching pipeline, falling back
    /// to the `any` pipeline if no pipeline is bound for this exact kind
    /// (spec.md §4.4 "any fallback").
    pub async fn on(&mut self, event: &Event) {
        let kind = if self.pipelines.contains_key(&event.kind) {
            event.kind
        } else if self.pipelines.contains_key(&EventKind::Any) {
            EventKind::Any
        } else {
            tracing::warn!(kind = %event.kind, "no pipeline bound for this event kind, dropping");
            return;
        };

        if let Some(pipeline) = self.pipelines.get_mut(&kind) {
            if !pipeline.is_idle() {
                tracing::warn!(kind = %kind, "pipeline still running from a previous fire, skipping");
                return;
            }
            pipeline.start(&self.scratch_dir).await;
        }
    }

    /// Advance every in-flight pipeline one step, running `on_error`/
    /// `on_success` handlers for whatever they report finished.
    pub async fn poll_step(&mut self) {
        let kinds: Vec<EventKind> = self.pipelines.keys().copied().collect();
        for kind in kinds {
            let outcomes = {
                let Some(pipeline) = self.pipelines.get_mut(&kind) else {
                    continue;
                };
                pipeline.poll_step(&self.scratch_dir).await
            };
            for outcome in outcomes {
                self.handle_outcome(kind, outcome).await;
            }
        }
    }

    async fn handle_outcome(&self, kind: EventKind, outcome: PipelineEvent) {
        match outcome {
            PipelineEvent::Success => {
                if let Some(handler) = &self.success_handler {
                    self.run_handler(handler.clone(), kind, None).await;
                }
            }
            PipelineEvent::Error(idx) => {
                let failing_name = self
                    .pipelines
                    .get(&kind)
                    .and_then(|p| p.callbacks().get(idx))
                    .map(|cb| cb.name.to_string());
                if let Some(handler) = &self.error_handler {
                    self.run_handler(handler.clone(), kind, failing_name).await;
                }
            }
        }
    }

    async fn run_handler(&self, mut handler: Callback, kind: EventKind, failing_name: Option<String>) {
        let event_name = failing_name.unwrap_or_else(|| kind.to_string());
        handler.env.insert(EVENT_NAME_VAR.to_string(), event_name);
        let code = executor::communicate(&handler, &self.scratch_dir).await;
        if !executor::is_success(code) {
            tracing::error!(handler = %handler.name, code, "handler callback exited non-zero");
        }
    }

    /// True once no pipeline is mid-run.
    pub fn is_done(&self) -> bool {
        self.pipelines.values().all(|p| p.is_idle())
    }

    /// Kill every running callback across every pipeline (graceful
    /// shutdown).
    pub async fn kill(&mut self) {
        for pipeline in self.pipelines.values_mut() {
            pipeline.kill().await;
        }
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
