// SPDX-License-Identifier: MIT

//! The fork/join callback state machine for one event kind (spec.md §4.5).
//!
//! Callbacks run in sequence unless a callback sets `fork`, in which case
//! the next callback launches immediately without waiting. A callback
//! with a `join` label blocks until every already-started callback whose
//! basename matches the label has completed, letting a forked branch
//! rejoin the main line.
//!
//! Grounded on the original's `CallBackPool` (`examples/original_source/
//! event/event.py`), generalized to also emit a `success` event (the
//! original never does) and to keep reaping already-forked siblings after
//! a failure even when `continue_on_error` is false, rather than
//! abandoning them mid-flight.

use crate::executor;
use crate::scratch_dir::ScratchDir;
use crate::worker::Worker;
use gman_core::Callback;
use std::path::PathBuf;

/// What happened as a pipeline was polled: either every callback
/// succeeded, or one particular callback (by pool index) failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    Success,
    Error(usize),
}

struct RunSlot {
    launched: bool,
    done: bool,
    return_code: Option<i32>,
    log_path: Option<PathBuf>,
    worker: Option<Box<dyn Worker>>,
}

impl RunSlot {
    fn fresh() -> Self {
        Self {
            launched: false,
            done: false,
            return_code: None,
            log_path: None,
            worker: None,
        }
    }
}

/// One event kind's callback pool, plus its per-run state.
pub struct CallbackPipeline {
    callbacks: Vec<Callback>,
    slots: Vec<RunSlot>,
    continue_on_error: bool,
    next_index: usize,
    /// The index of a running, non-forked callback that gates further
    /// launches until it completes.
    blocked_on: Option<usize>,
    terminating: bool,
    idle: bool,
}

impl CallbackPipeline {
    pub fn new(callbacks: Vec<Callback>, continue_on_error: bool) -> Self {
        let slots = callbacks.iter().map(|_| RunSlot::fresh()).collect();
        Self {
            callbacks,
            slots,
            continue_on_error,
            next_index: 0,
            blocked_on: None,
            terminating: false,
            idle: true,
        }
    }

    pub fn callbacks(&self) -> &[Callback] {
        &self.callbacks
    }

    /// True once every callback has been launched and reaped and no
    /// further event is pending delivery.
    pub fn is_idle(&self) -> bool {
        self.idle
    }

    /// Begin a fresh run of this pipeline: reset all per-run state and
    /// launch as far as fork/join gating allows.
    pub async fn start(&mut self, scratch_dir: &ScratchDir) {
        for slot in &mut self.slots {
            *slot = RunSlot::fresh();
        }
        self.next_index = 0;
        self.blocked_on = None;
        self.terminating = false;
        self.idle = false;
        self.advance(scratch_dir).await;
    }

    /// Poll every running callback, reap finished ones, launch whatever
    /// fork/join gating newly allows, and report what changed.
    pub async fn poll_step(&mut self, scratch_dir: &ScratchDir) -> Vec<PipelineEvent> {
        if self.idle {
            return Vec::new();
        }

        let mut events = Vec::new();
        for idx in 0..self.slots.len() {
            if !self.slots[idx].launched || self.slots[idx].done {
                continue;
            }
            let Some(worker) = self.slots[idx].worker.as_mut() else {
                continue;
            };
            if let Some(code) = worker.poll().await {
                self.slots[idx].done = true;
                self.slots[idx].return_code = Some(code);
                if code != 0 {
                    events.push(PipelineEvent::Error(idx));
                    if !self.continue_on_error {
                        self.terminating = true;
                    }
                }
            }
        }

        if !self.terminating {
            self.advance(scratch_dir).await;
        }

        if self.fully_drained() {
            self.idle = true;
            if !self.terminating {
                events.push(PipelineEvent::Success);
            }
        }

        events
    }

    /// Kill every still-running callback (graceful shutdown).
    pub async fn kill(&mut self) {
        for slot in &mut self.slots {
            if slot.launched && !slot.done {
                if let Some(worker) = slot.worker.as_mut() {
                    worker.kill().await;
                }
            }
        }
    }

    pub fn log_path(&self, idx: usize) -> Option<&PathBuf> {
        self.slots.get(idx).and_then(|s| s.log_path.as_ref())
    }

    /// True once nothing is still running and no further callback will
    /// be launched: either every callback has had its turn, or the
    /// pipeline is terminating and every already-started callback
    /// (forked siblings included) has been reaped (spec.md §9 ambiguity
    /// #2: reap in-flight forks before going idle, but don't wait for
    /// ones that will never start).
    fn fully_drained(&self) -> bool {
        (self.terminating || (self.next_index >= self.callbacks.len() && self.blocked_on.is_none()))
            && self.slots.iter().all(|s| !s.launched || s.done)
    }

    /// Launch as many callbacks as fork/join gating allows from
    /// `next_index` onward.
    async fn advance(&mut self, scratch_dir: &ScratchDir) {
        loop {
            if let Some(blocking) = self.blocked_on {
                if !self.slots[blocking].done {
                    break;
                }
                self.blocked_on = None;
            }
            if self.terminating || self.next_index >= self.callbacks.len() {
                break;
            }

            let idx = self.next_index;
            if let Some(join) = &self.callbacks[idx].join {
                if !self.join_satisfied(join, idx) {
                    break;
                }
            }

            let spawned = executor::spawn(&self.callbacks[idx], scratch_dir).await;
            self.slots[idx].launched = true;
            self.slots[idx].log_path = spawned.log_path;
            self.slots[idx].worker = Some(spawned.worker);

            let forked = self.callbacks[idx].fork;
            self.next_index += 1;
            if forked {
                continue;
            }
            self.blocked_on = Some(idx);
            break;
        }
    }

    /// All previously started callbacks whose basename matches `join`
    /// must be done before `idx` may start. Vacuously true if none
    /// match (spec.md §4.5 "Join barrier").
    fn join_satisfied(&self, join: &gman_core::JoinLabel, idx: usize) -> bool {
        (0..idx).all(|j| {
            if !self.slots[j].launched {
                return true;
            }
            if !join.matches(self.callbacks[j].name.basename()) {
                return true;
            }
            self.slots[j].done
        })
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
