//! Corruption recovery tests for fitplan.
//!
//! These tests verify the system can handle:
//! - Corrupted plan books
//! - Corrupted track logs
//! - Missing and empty files
//! - Partial writes

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write as IoWrite;
use std::path::Path;
use tempfile::TempDir;

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fitplan"));
    cmd.arg("--data-dir")
        .arg(dir)
        .arg("--config")
        .arg(dir.join("config.toml"));
    cmd
}

fn setup_test_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("config.toml"), "").expect("Failed to write config");
    dir
}

#[test]
fn test_corrupted_plan_book_is_not_overwritten() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::create_dir_all(data_dir.join("plans")).unwrap();
    let book_path = data_dir.join("plans/plans.json");
    fs::write(&book_path, "{ invalid json }}}}").expect("Failed to write corrupted book");

    // Silently starting over would lose every stored plan
    cli(data_dir).arg("plan").assert().failure();
    cli(data_dir).arg("show").assert().failure();

    let contents = fs::read_to_string(&book_path).unwrap();
    assert_eq!(contents, "{ invalid json }}}}");
}

#[test]
fn test_dry_run_ignores_corrupted_plan_book() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::create_dir_all(data_dir.join("plans")).unwrap();
    fs::write(data_dir.join("plans/plans.json"), "corrupted").unwrap();

    cli(data_dir).args(["plan", "--dry-run"]).assert().success();
}

#[test]
fn test_empty_plan_book_starts_fresh() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::create_dir_all(data_dir.join("plans")).unwrap();
    fs::write(data_dir.join("plans/plans.json"), "").unwrap();

    cli(data_dir)
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ New plan created"));

    let contents = fs::read_to_string(data_dir.join("plans/plans.json")).unwrap();
    let parsed: Result<serde_json::Value, _> = serde_json::from_str(&contents);
    assert!(parsed.is_ok(), "Plan book should be valid JSON");
}

#[test]
fn test_corrupted_track_lines_ignored_during_read() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).arg("plan").assert().success();
    cli(data_dir)
        .args(["done", "--day", "1", "--order", "0", "--note", "valid"])
        .assert()
        .success();

    // Simulate a crash mid-write after the valid line
    let wal_path = data_dir.join("wal/workout_tracks.wal");
    let mut file = fs::OpenOptions::new().append(true).open(&wal_path).unwrap();
    writeln!(file, "{{ invalid json }}").unwrap();
    write!(file, r#"{{"id":"partial"#).unwrap();
    drop(file);

    cli(data_dir)
        .arg("tracks")
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));

    // Rollup keeps the good line and archives the rest
    cli(data_dir)
        .arg("rollup")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Rolled up 1 tracks to CSV"));
}

#[test]
fn test_empty_track_log() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::create_dir_all(data_dir.join("wal")).unwrap();
    fs::write(data_dir.join("wal/workout_tracks.wal"), "").unwrap();

    cli(data_dir)
        .arg("tracks")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts logged"));

    cli(data_dir)
        .arg("rollup")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Rolled up 0 tracks"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("config.toml"), "[history]\nwindow_days = -1\n").unwrap();

    cli(data_dir).arg("plan").assert().failure();
    assert!(!data_dir.join("plans").exists());
}

#[test]
fn test_unreadable_plan_book() {
    // Skip on Windows (permission model is different)
    if cfg!(windows) {
        return;
    }

    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).arg("plan").assert().success();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let book_path = data_dir.join("plans/plans.json");
        let mut perms = fs::metadata(&book_path).unwrap().permissions();
        perms.set_mode(0o000);
        fs::set_permissions(&book_path, perms).unwrap();

        // Root ignores file modes, so only check that dry runs never touch the book
        cli(data_dir).args(["plan", "--dry-run"]).assert().success();

        let mut perms = fs::metadata(&book_path).unwrap().permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&book_path, perms).unwrap();
    }
}
