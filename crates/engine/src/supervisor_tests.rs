use super::*;
use crate::pipeline::CallbackPipeline;
use crate::router::EventRouter;
use crate::scratch_dir::ScratchDir;
use gman_core::callback::Command as CallbackCommand;
use gman_core::{Callback, Clock, EventKind, FakeClock, HierName, Schedule};
use std::collections::HashMap;
use std::sync::Arc;

fn bare_scheduler_monitor(name: &str, scratch: Arc<ScratchDir>, clock: Arc<FakeClock>) -> Monitor {
    let mut pipelines = HashMap::new();
    pipelines.insert(
        EventKind::Any,
        CallbackPipeline::new(
            vec![Callback::new(
                HierName::new(format!("{name}/cb")),
                CallbackCommand::function(|| 0),
            )],
            false,
        ),
    );
    let router = EventRouter::new(pipelines, None, None, scratch);
    let schedule = Schedule::parse("every second", clock.now()).expect("parse schedule");
    Monitor::new(HierName::new(name), schedule, None, router, clock)
}

#[tokio::test]
async fn shutdown_kills_every_monitor_without_panicking() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let scratch = Arc::new(ScratchDir::prepare(&tmp.path().join("scratch")).expect("scratch"));
    let clock = Arc::new(FakeClock::new(chrono::Utc::now()));

    let a = bare_scheduler_monitor("p/a", scratch.clone(), clock.clone());
    let b = bare_scheduler_monitor("p/b", scratch.clone(), clock.clone());
    let mut supervisor = Supervisor::new(vec![a, b]);

    clock.advance(chrono::Duration::seconds(2));
    for monitor in &mut supervisor.monitors {
        monitor.tick().await.expect("tick");
    }

    supervisor.shutdown().await;
}

#[tokio::test]
async fn a_failing_monitor_does_not_stop_the_others_from_ticking() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let scratch = Arc::new(ScratchDir::prepare(&tmp.path().join("scratch")).expect("scratch"));
    let clock = Arc::new(FakeClock::new(chrono::Utc::now()));

    // A monitor with an unparsable-at-runtime schedule never errors once
    // built, so instead we assert the supervisor's per-monitor loop body
    // tolerates an Ok *and* keeps ticking every monitor every pass.
    let a = bare_scheduler_monitor("p/a", scratch.clone(), clock.clone());
    let b = bare_scheduler_monitor("p/b", scratch.clone(), clock.clone());
    let mut supervisor = Supervisor::new(vec![a, b]);

    clock.advance(chrono::Duration::seconds(2));
    for monitor in &mut supervisor.monitors {
        assert!(monitor.tick().await.is_ok());
    }
}
