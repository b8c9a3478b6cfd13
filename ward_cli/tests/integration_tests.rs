//! Integration tests for the ward binary.
//!
//! These tests drive the interactive menu through stdin and verify:
//! - Emergency-first discharge ordering
//! - Lookup of discharged patients
//! - Undo/redo reporting
//! - Exports written on exit

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary, isolated from any user config
fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ward"));
    cmd.arg("--config").arg(dir.path().join("config.toml"));
    cmd
}

/// Menu input that admits one patient
fn admit(emergency: bool, id: i64, name: &str, severity: i32, department: &str) -> String {
    let choice = if emergency { 2 } else { 1 };
    format!("{}\n{}\n{}\n{}\n{}\n", choice, id, name, severity, department)
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("ward"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("patient flow registry"));
}

#[test]
fn test_emergency_discharged_first() {
    let dir = setup_test_dir();
    let script = format!(
        "{}{}3\n3\n7\n0\n",
        admit(false, 1, "Normal", 3, "general"),
        admit(true, 2, "Urgent", 9, "trauma"),
    );

    let output = cli(&dir)
        .write_stdin(script)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8_lossy(&output);

    let first = stdout
        .find("  ID: 2 Name: Urgent")
        .expect("emergency patient discharged");
    let second = stdout
        .find("  ID: 1 Name: Normal")
        .expect("normal patient discharged");
    assert!(first < second);
    assert!(stdout.contains("ID: 1 Name: Normal\nID: 2 Name: Urgent\n"));
}

#[test]
fn test_empty_registry_messages() {
    let dir = setup_test_dir();
    cli(&dir)
        .write_stdin("3\n4\n17\n5\n6\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No patients to discharge."))
        .stdout(predicate::str::contains("Patient not found."))
        .stdout(predicate::str::contains("Nothing to undo."))
        .stdout(predicate::str::contains("Nothing to redo."));
}

#[test]
fn test_undo_redo_report_admit() {
    let dir = setup_test_dir();
    let script = format!("{}5\n6\n6\n0\n", admit(false, 4, "Dana", 5, "ortho"));

    cli(&dir)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Undo operation performed: ADMIT"))
        .stdout(predicate::str::contains("Redo operation performed: ADMIT"))
        .stdout(predicate::str::contains("Nothing to redo."));
}

#[test]
fn test_search_after_discharge() {
    let dir = setup_test_dir();
    let script = format!(
        "{}{}{}{}3\n3\n3\n3\n4\n3\n7\n0\n",
        admit(false, 5, "E", 1, "a"),
        admit(false, 3, "C", 2, "b"),
        admit(false, 8, "H", 3, "c"),
        admit(false, 1, "A", 4, "d"),
    );

    let output = cli(&dir)
        .write_stdin(script)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8_lossy(&output);

    assert!(stdout.contains("Found: C Severity: 2"));
    assert!(stdout.contains("ID: 1 Name: A\nID: 3 Name: C\nID: 5 Name: E\nID: 8 Name: H\n"));
}

#[test]
fn test_exports_written_on_exit() {
    let dir = setup_test_dir();
    let csv_path = dir.path().join("exports").join("archive.csv");
    let json_path = dir.path().join("exports").join("snapshot.json");
    let script = format!(
        "{}{}3\n0\n",
        admit(false, 10, "Kim", 4, "renal"),
        admit(false, 11, "Lee", 6, "icu"),
    );

    cli(&dir)
        .arg("menu")
        .arg("--export-csv")
        .arg(&csv_path)
        .arg("--export-json")
        .arg(&json_path)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 archived patients"));

    let csv_content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(csv_content.contains("10,Kim,4,renal,1,normal"));

    let json_content = fs::read_to_string(&json_path).expect("Failed to read snapshot");
    let snapshot: serde_json::Value = serde_json::from_str(&json_content).unwrap();
    assert_eq!(snapshot["waiting"][0]["id"], 11);
    assert_eq!(snapshot["undo_depth"], 2);
}

#[test]
fn test_export_flag_uses_configured_dir() {
    let dir = setup_test_dir();
    let export_dir = dir.path().join("configured-exports");
    fs::write(
        dir.path().join("config.toml"),
        format!("[export]\ndir = {:?}\n", export_dir.to_string_lossy()),
    )
    .unwrap();
    let script = format!("{}3\n0\n", admit(true, 21, "Rue", 8, "burns"));

    cli(&dir)
        .arg("menu")
        .arg("--export")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 archived patients"))
        .stdout(predicate::str::contains("Exported registry snapshot"));

    let csv_content =
        fs::read_to_string(export_dir.join("archive.csv")).expect("Failed to read CSV");
    assert!(csv_content.contains("21,Rue,8,burns,1,emergency"));

    let json_content =
        fs::read_to_string(export_dir.join("snapshot.json")).expect("Failed to read snapshot");
    let snapshot: serde_json::Value = serde_json::from_str(&json_content).unwrap();
    assert_eq!(snapshot["archive"][0]["id"], 21);
    assert_eq!(snapshot["waiting"].as_array().map(|w| w.len()), Some(0));
}

#[test]
fn test_invalid_input_returns_to_menu() {
    let dir = setup_test_dir();
    cli(&dir)
        .write_stdin("1\nnot-a-number\n9\nx\nabc\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid number: not-a-number"))
        .stdout(predicate::str::contains("Invalid sort key: x"))
        .stdout(predicate::str::contains("Invalid choice: abc"));
}

#[test]
fn test_init_config_writes_defaults() {
    let dir = setup_test_dir();

    cli(&dir)
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    let content = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(content.contains("severity_max = 10"));

    cli(&dir)
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
