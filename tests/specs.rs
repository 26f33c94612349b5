// SPDX-License-Identifier: MIT

//! End-to-end scenarios from spec.md §8 that need the real `gman`
//! binary and filesystem (S1, S2, S6) plus the CLI surface (§6):
//! `list-targets`, `list-schedule`, `clean`, and configuration errors.
//!
//! Grounded on the teacher's root-package integration-test pattern
//! (`assert_cmd` + `tempfile`), per SPEC_FULL.md §6.5.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn gman() -> Command {
    Command::cargo_bin("gman").expect("gman binary")
}

fn write_config(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("create config");
    file.write_all(contents.as_bytes()).expect("write config");
    path
}

#[test]
fn run_requires_the_config_flag() {
    gman()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("-c/--config is required"));
}

#[test]
fn missing_project_is_a_configuration_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = write_config(
        tmp.path(),
        "gman.yaml",
        r#"
jobs:
  build:
    monitor:
      type: ""
      schedule: "every second"
    on_events:
      any:
        - {name: "echo", cmd: "echo hi"}
"#,
    );

    gman()
        .current_dir(tmp.path())
        .args(["run", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("project"));
}

#[test]
fn empty_on_events_is_a_configuration_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = write_config(
        tmp.path(),
        "gman.yaml",
        r#"
project: demo
jobs:
  build:
    monitor:
      type: ""
      schedule: "every second"
    on_events: {}
"#,
    );

    gman()
        .current_dir(tmp.path())
        .args(["run", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("on_events"));
}

#[test]
fn list_targets_prints_resolved_filesystem_targets() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let watched = tmp.path().join("watched");
    std::fs::create_dir(&watched).expect("mkdir");
    std::fs::write(watched.join("a.txt"), "1").expect("write a.txt");

    let pattern = format!("{}/*", watched.display());
    let config = write_config(
        tmp.path(),
        "gman.yaml",
        &format!(
            r#"
project: demo
jobs:
  build:
    monitor:
      type: "file"
      schedule: "every second"
      targets: ["{pattern}"]
    on_events:
      any:
        - {{name: "echo", cmd: "echo hi"}}
"#
        ),
    );

    gman()
        .current_dir(tmp.path())
        .args(["list-targets", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("demo/build"))
        .stdout(predicate::str::contains("a.txt"));
}

#[test]
fn list_targets_filters_by_job_name() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = write_config(
        tmp.path(),
        "gman.yaml",
        r#"
project: demo
jobs:
  alpha:
    monitor:
      type: ""
      schedule: "every second"
    on_events:
      any:
        - {name: "echo", cmd: "echo alpha"}
  beta:
    monitor:
      type: ""
      schedule: "every second"
    on_events:
      any:
        - {name: "echo", cmd: "echo beta"}
"#,
    );

    gman()
        .current_dir(tmp.path())
        .args(["list-targets", "alpha", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("demo/alpha"))
        .stdout(predicate::str::contains("demo/beta").not());
}

#[test]
fn list_schedule_prints_five_upcoming_fire_times() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = write_config(
        tmp.path(),
        "gman.yaml",
        r#"
project: demo
jobs:
  build:
    monitor:
      type: ""
      schedule: "every minute"
    on_events:
      any:
        - {name: "echo", cmd: "echo hi"}
"#,
    );

    let output = gman()
        .current_dir(tmp.path())
        .args(["list-schedule", "-c"])
        .arg(&config)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).expect("utf8");
    let line_count = text.lines().filter(|l| l.starts_with("  ")).count();
    assert_eq!(line_count, 5);
}

#[test]
fn clean_removes_rotated_scratch_dirs_and_logs_but_not_live_ones() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(tmp.path().join(".gman_tempdir")).expect("mkdir live scratch");
    std::fs::create_dir(tmp.path().join(".gman_tempdir_1700000000")).expect("mkdir rotated scratch");
    std::fs::write(tmp.path().join("gman.log"), "live").expect("write live log");
    std::fs::write(tmp.path().join("gman.log.1700000000"), "rotated").expect("write rotated log");

    gman()
        .current_dir(tmp.path())
        .arg("clean")
        .assert()
        .success();

    assert!(tmp.path().join(".gman_tempdir").exists());
    assert!(tmp.path().join("gman.log").exists());
    assert!(!tmp.path().join(".gman_tempdir_1700000000").exists());
    assert!(!tmp.path().join("gman.log.1700000000").exists());
}

/// S6 (scheduler, no targets): a scheduler-only monitor on `every
/// N seconds` runs its callback at least twice within a few seconds.
#[test]
fn scheduler_only_monitor_fires_repeatedly_without_targets() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let counter_path = tmp.path().join("count");
    std::fs::write(&counter_path, "").expect("create counter file");

    let config = write_config(
        tmp.path(),
        "gman.yaml",
        &format!(
            r#"
project: demo
jobs:
  tick:
    monitor:
      type: ""
      schedule: "every 1 seconds"
    on_events:
      any:
        - {{name: "tick", cmd: "sh -c 'echo x >> {path}'"}}
"#,
            path = counter_path.display()
        ),
    );

    let mut child = gman()
        .current_dir(tmp.path())
        .args(["run", "-c"])
        .arg(&config)
        .spawn()
        .expect("spawn gman run");

    std::thread::sleep(std::time::Duration::from_secs(5));

    let _ = child.kill();
    let _ = child.wait();

    let contents = std::fs::read_to_string(&counter_path).expect("read counter");
    let lines = contents.lines().filter(|l| !l.is_empty()).count();
    assert!(lines >= 2, "expected at least 2 ticks, got {lines}");
}
