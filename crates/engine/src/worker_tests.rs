use super::*;
use gman_core::callback::FunctionHandle;
use std::sync::Arc;
use tokio::process::Command;

#[tokio::test]
async fn process_worker_reports_zero_on_success() {
    let child = Command::new("true").spawn().expect("spawn true");
    let mut worker = ProcessWorker::new(child);
    let code = loop {
        if let Some(code) = worker.poll().await {
            break code;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    };
    assert_eq!(code, 0);
    assert_eq!(worker.return_code(), Some(0));
}

#[tokio::test]
async fn process_worker_reports_nonzero_on_failure() {
    let child = Command::new("false").spawn().expect("spawn false");
    let mut worker = ProcessWorker::new(child);
    let code = loop {
        if let Some(code) = worker.poll().await {
            break code;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    };
    assert_ne!(code, 0);
}

#[tokio::test]
async fn process_worker_kill_terminates_a_running_child() {
    let child = Command::new("sleep").arg("30").spawn().expect("spawn sleep");
    let mut worker = ProcessWorker::new(child);
    assert_eq!(worker.poll().await, None);
    worker.kill().await;
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(worker.poll().await.is_some());
}

#[tokio::test]
async fn task_worker_runs_function_and_reports_its_code() {
    let f: FunctionHandle = Arc::new(|| 0);
    let mut worker = TaskWorker::spawn(f);
    let code = loop {
        if let Some(code) = worker.poll().await {
            break code;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    };
    assert_eq!(code, 0);
}

#[tokio::test]
async fn task_worker_always_reports_zero_regardless_of_the_function_result() {
    let f: FunctionHandle = Arc::new(|| 7);
    let mut worker = TaskWorker::spawn(f);
    let code = loop {
        if let Some(code) = worker.poll().await {
            break code;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    };
    assert_eq!(code, 0);
}

#[tokio::test]
async fn task_worker_kill_is_a_no_op() {
    let f: FunctionHandle = Arc::new(|| 0);
    let mut worker = TaskWorker::spawn(f);
    worker.kill().await;
    let code = loop {
        if let Some(code) = worker.poll().await {
            break code;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    };
    assert_eq!(code, 0);
}

#[tokio::test]
async fn failed_worker_immediately_reports_execute_fail() {
    let mut worker = FailedWorker;
    assert_eq!(worker.poll().await, Some(EXECUTE_FAIL));
    assert_eq!(worker.return_code(), Some(EXECUTE_FAIL));
    worker.kill().await;
    assert_eq!(worker.return_code(), Some(EXECUTE_FAIL));
}
