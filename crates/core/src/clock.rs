// SPDX-License-Identifier: MIT

//! Clock abstraction so schedule and timeout logic is deterministic in tests.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// Anything that can report the current time.
///
/// Mirrors the teacher's `oj_core::clock::Clock` trait: production code
/// takes `&impl Clock` (or `Arc<dyn Clock>`) instead of calling `Utc::now()`
/// directly, so fork/join timing and schedule-firing tests are
/// reproducible.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// The current instant, in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock whose value is set explicitly, for deterministic tests.
#[derive(Debug, Clone)]
pub struct FakeClock(Arc<Mutex<DateTime<Utc>>>);

impl FakeClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(Arc::new(Mutex::new(at)))
    }

    /// Advance the clock by `delta`.
    pub fn advance(&self, delta: chrono::Duration) {
        let mut guard = self.0.lock();
        *guard += delta;
    }

    /// Set the clock to an explicit time.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.0.lock() = at;
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
