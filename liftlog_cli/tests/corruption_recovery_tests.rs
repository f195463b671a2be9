//! Corruption recovery tests for liftlog.
//!
//! These tests verify the system can handle:
//! - Corrupted goal files
//! - Corrupted set-log files
//! - Missing files
//! - Partial writes

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("liftlog"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_corrupted_goal_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Write corrupted goal file
    fs::write(data_dir.join("goals.json"), "{ invalid json }}}}")
        .expect("Failed to write corrupted goals");

    // Listing degrades to an empty book instead of failing
    cli()
        .arg("goal")
        .arg("list")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No goals set"));
}

#[test]
fn test_corrupted_log_lines_ignored_during_read() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Log a good set, then append garbage lines by hand
    cli()
        .arg("log")
        .arg("bench")
        .arg("--weight")
        .arg("80")
        .arg("--reps")
        .arg("8")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    let log_path = data_dir.join("log/sets.jsonl");
    let mut content = fs::read_to_string(&log_path).unwrap();
    content.push_str("{ invalid json }\n{ more invalid }\n");
    fs::write(&log_path, content).unwrap();

    // Stats still work from the surviving line
    cli()
        .arg("stats")
        .arg("bench")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("best 80 kg × 8"));
}

#[test]
fn test_missing_data_dir_is_created_on_log() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("deeply/nested/dir");

    cli()
        .arg("log")
        .arg("squat")
        .arg("--weight")
        .arg("100")
        .arg("--reps")
        .arg("5")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    assert!(data_dir.join("log/sets.jsonl").exists());
}

#[test]
fn test_empty_log_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    fs::create_dir_all(data_dir.join("log")).unwrap();
    fs::write(data_dir.join("log/sets.jsonl"), "").unwrap();

    cli()
        .arg("stats")
        .arg("bench")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No history"));
}
