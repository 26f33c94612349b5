use super::*;
use gman_core::callback::Command as CallbackCommand;
use gman_core::{HierName, JoinLabel};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn ok(name: &str) -> Callback {
    Callback::new(HierName::new(name), CallbackCommand::function(|| 0))
}

/// A function-backed worker always reports success once complete
/// (spec.md §9), so failure scenarios are driven through an argv
/// callback instead, matching spec.md S3/S4 (`cmd="exit 1"`).
fn failing(name: &str) -> Callback {
    Callback::new(
        HierName::new(name),
        CallbackCommand::parse("exit 1").expect("valid argv"),
    )
}

async fn run_to_idle(pipeline: &mut CallbackPipeline, scratch: &ScratchDir) -> Vec<PipelineEvent> {
    let mut all = Vec::new();
    pipeline.start(scratch).await;
    while !pipeline.is_idle() {
        all.extend(pipeline.poll_step(scratch).await);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    all
}

fn scratch(tmp: &tempfile::TempDir) -> ScratchDir {
    ScratchDir::prepare(&tmp.path().join("scratch")).expect("prepare scratch")
}

#[tokio::test]
async fn all_succeeding_callbacks_emit_a_single_success_event() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = scratch(&tmp);
    let mut pipeline = CallbackPipeline::new(vec![ok("p/j/added/a"), ok("p/j/added/b")], false);

    let events = run_to_idle(&mut pipeline, &dir).await;
    assert_eq!(events, vec![PipelineEvent::Success]);
}

#[tokio::test]
async fn a_failing_callback_stops_the_sequence_when_continue_on_error_is_false() {
    let second_ran = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let second_ran_clone = second_ran.clone();

    let first = failing("p/j/added/first");
    let second = Callback::new(
        HierName::new("p/j/added/second"),
        CallbackCommand::function(move || {
            second_ran_clone.store(true, Ordering::SeqCst);
            0
        }),
    );

    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = scratch(&tmp);
    let mut pipeline = CallbackPipeline::new(vec![first, second], false);

    let events = run_to_idle(&mut pipeline, &dir).await;
    assert_eq!(events, vec![PipelineEvent::Error(0)]);
    assert!(!second_ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn continue_on_error_runs_every_callback_and_reports_each_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = scratch(&tmp);
    let mut pipeline = CallbackPipeline::new(
        vec![failing("p/j/added/a"), ok("p/j/added/b"), failing("p/j/added/c")],
        true,
    );

    let events = run_to_idle(&mut pipeline, &dir).await;
    assert_eq!(events, vec![PipelineEvent::Error(0), PipelineEvent::Error(2)]);
}

#[tokio::test]
async fn a_forked_callback_does_not_block_its_successor() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = scratch(&tmp);
    let forked = ok("p/j/added/branch").with_fork(true);
    let mut pipeline = CallbackPipeline::new(vec![forked, ok("p/j/added/main")], false);

    pipeline.start(&dir).await;
    // Both the fork and its successor should be launched on the first
    // start, without waiting for the fork to complete.
    assert!(pipeline.callbacks().len() == 2);

    let events = run_to_idle(&mut pipeline, &dir).await;
    assert_eq!(events, vec![PipelineEvent::Success]);
}

#[tokio::test]
async fn a_join_waits_for_every_matching_forked_predecessor() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = scratch(&tmp);

    let branch_a = ok("p/j/added/branch").with_fork(true);
    let branch_b = ok("p/j/added/branch").with_fork(true);
    let joiner = ok("p/j/added/rejoin").with_join(Some(JoinLabel::parse("branch")));

    let mut pipeline = CallbackPipeline::new(vec![branch_a, branch_b, joiner], false);
    let events = run_to_idle(&mut pipeline, &dir).await;
    assert_eq!(events, vec![PipelineEvent::Success]);
}

#[tokio::test]
async fn a_join_with_no_matching_predecessor_is_vacuously_satisfied() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = scratch(&tmp);
    let joiner = ok("p/j/added/lonely").with_join(Some(JoinLabel::parse("nothing-like-this")));
    let mut pipeline = CallbackPipeline::new(vec![joiner], false);

    let events = run_to_idle(&mut pipeline, &dir).await;
    assert_eq!(events, vec![PipelineEvent::Success]);
}

#[tokio::test]
async fn starting_the_same_pipeline_twice_reruns_every_callback_from_scratch() {
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = count.clone();
    let callback = Callback::new(
        HierName::new("p/j/added/counted"),
        CallbackCommand::function(move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
            0
        }),
    );

    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = scratch(&tmp);
    let mut pipeline = CallbackPipeline::new(vec![callback], false);

    run_to_idle(&mut pipeline, &dir).await;
    run_to_idle(&mut pipeline, &dir).await;

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn continue_on_error_reaps_already_forked_siblings_before_going_idle() {
    let sibling_ran = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let sibling_ran_clone = sibling_ran.clone();

    let first = failing("p/j/added/first").with_fork(true);
    let sibling = Callback::new(
        HierName::new("p/j/added/sibling"),
        CallbackCommand::function(move || {
            sibling_ran_clone.store(true, Ordering::SeqCst);
            0
        }),
    );

    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = scratch(&tmp);
    let mut pipeline = CallbackPipeline::new(vec![first, sibling], false);

    let events = run_to_idle(&mut pipeline, &dir).await;
    assert_eq!(events, vec![PipelineEvent::Error(0)]);
    assert!(sibling_ran.load(Ordering::SeqCst));
}
