//! Concurrency tests for liftlog.
//!
//! These tests verify that multiple processes can safely:
//! - Append to the set log simultaneously (file locking)
//! - Read while another process writes
//! - Perform rollup operations without corruption

use assert_cmd::Command;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("liftlog"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_sequential_set_logging() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Log sets with slight delays (more realistic than thundering herd)
    for i in 0..5 {
        thread::sleep(Duration::from_millis(i * 5));
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
    }

    // Verify all sets were logged
    let log_path = data_dir.join("log/sets.jsonl");
    let content = std::fs::read_to_string(&log_path).expect("Failed to read set log");

    // Count lines (each line is a set)
    let set_count = content.lines().count();
    assert_eq!(set_count, 5, "Expected 5 sets, got {}", set_count);
}

#[test]
fn test_parallel_set_logging() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let dir = data_dir.clone();
            thread::spawn(move || {
                cli()
                    .arg("log")
                    .arg("squat")
                    .arg("--weight")
                    .arg(format!("{}", 100 + i * 5))
                    .arg("--reps")
                    .arg("5")
                    .arg("--data-dir")
                    .arg(&dir)
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    // Every append must have landed on its own line
    let log_path = data_dir.join("log/sets.jsonl");
    let content = std::fs::read_to_string(&log_path).expect("Failed to read set log");
    assert_eq!(content.lines().count(), 4);

    // And each line must be valid JSON
    for line in content.lines() {
        serde_json::from_str::<serde_json::Value>(line).expect("corrupted JSONL line");
    }
}

#[test]
fn test_read_during_write() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Seed some history
    cli()
        .arg("log")
        .arg("deadlift")
        .arg("--weight")
        .arg("140")
        .arg("--reps")
        .arg("3")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    let writer_dir = data_dir.clone();
    let writer = thread::spawn(move || {
        for _ in 0..3 {
            cli()
                .arg("log")
                .arg("deadlift")
                .arg("--weight")
                .arg("140")
                .arg("--reps")
                .arg("3")
                .arg("--data-dir")
                .arg(&writer_dir)
                .assert()
                .success();
        }
    });

    // Reads interleave with the writer and always succeed
    for _ in 0..3 {
        cli()
            .arg("stats")
            .arg("deadlift")
            .arg("--data-dir")
            .arg(&data_dir)
            .assert()
            .success();
    }

    writer.join().expect("writer thread panicked");
}
