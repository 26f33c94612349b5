// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gman-core: data model for the gman monitor-event engine.
//!
//! This crate holds the pure, synchronous data types shared by the rest of
//! the workspace: hierarchical names, the clock abstraction, cron
//! scheduling, targets/snapshots/fingerprints, change events and the
//! differ, and the static callback configuration. Nothing in this crate
//! spawns a process or touches the filesystem beyond `std::time`.

pub mod callback;
pub mod clock;
pub mod differ;
pub mod error;
pub mod event;
pub mod hier_name;
pub mod schedule;
pub mod snapshot;
pub mod target;

pub use callback::{Callback, Command, JoinLabel};
pub use clock::{Clock, FakeClock, SystemClock};
pub use differ::diff;
pub use error::ScheduleError;
pub use event::{Event, EventKind};
pub use hier_name::HierName;
pub use schedule::Schedule;
pub use snapshot::{Fingerprint, Snapshot};
pub use target::Target;
