//! CLI Integration Tests
//!
//! Tests the CLI binary directly using assert_cmd to exercise main.rs code paths.
//! Every test points --dir at a temporary directory.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn roster(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vendor-roster").unwrap();
    cmd.env_remove("VENDOR_ROSTER_DIR")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path());
    cmd
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND ARGUMENTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("vendor-roster").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--add"))
        .stdout(predicate::str::contains("--modify"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("vendor-roster").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vendor-roster"));
}

#[test]
fn test_cli_requires_an_action() {
    let dir = TempDir::new().unwrap();
    roster(&dir).assert().failure();
}

#[test]
fn test_cli_rejects_two_actions() {
    let dir = TempDir::new().unwrap();
    roster(&dir).args(["--add", "--modify"]).assert().failure();
}

#[test]
fn test_cli_list_needs_project_and_source() {
    let dir = TempDir::new().unwrap();
    roster(&dir).arg("--list").assert().failure();
}

// ═══════════════════════════════════════════════════════════════════════════
// ADD / LIST / MODIFY
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_add_then_list() {
    let dir = TempDir::new().unwrap();

    roster(&dir)
        .arg("--add")
        .write_stdin("Toyota MM24\nEnglish\nJan De Smet\nDutch\njan.desmet@agency.be\n0.13\nXTM\ntrue\nyes\nyes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("added as vendor 0"));

    assert!(dir.path().join("Toyota MM24_English.xlsx").is_file());

    roster(&dir)
        .args(["--list", "--project", "Toyota MM24", "--source", "English"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jan De Smet"))
        .stdout(predicate::str::contains("Preferred"))
        .stdout(predicate::str::contains("1 vendor(s)"));
}

#[test]
fn test_cli_modify_then_list_json() {
    let dir = TempDir::new().unwrap();

    roster(&dir)
        .arg("-a")
        .write_stdin("Guide\nNL\nEmily van der Londen\nFR\n\n0.14\n\n\nyes\nyes\n")
        .assert()
        .success();

    roster(&dir)
        .arg("-m")
        .write_stdin("Guide\nNL\n0\n\n0.12\n\nPreferred\nyes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("modified correctly"));

    let output = roster(&dir)
        .args(["-l", "-p", "Guide", "-s", "NL", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["Word Rate"]["0"], 0.12);
    assert_eq!(json["Status"]["0"], "Preferred");
    assert_eq!(json["CAT Tool"]["0"], "XTM");
}

#[test]
fn test_cli_add_fails_on_closed_input() {
    let dir = TempDir::new().unwrap();

    roster(&dir)
        .arg("--add")
        .write_stdin("Guide\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Adding a vendor failed"));
}

#[test]
fn test_cli_list_missing_spreadsheet() {
    let dir = TempDir::new().unwrap();

    roster(&dir)
        .args(["--list", "--project", "Guide", "--source", "NL"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No vendor spreadsheet for 'Guide_NL'"));
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_import_json() {
    let dir = TempDir::new().unwrap();
    let bag = dir.path().join("vendors.json");
    fs::write(
        &bag,
        r#"{"project_name": "Handboek", "source_lang": "NL", "target_lang": "EN",
            "vendor_name": "Sibylle de Woot", "vendor_mail": "sdewoot@email.be",
            "word_rate": 0.1, "cat_tool": "MemoQ", "preferred": true}"#,
    )
    .unwrap();

    roster(&dir)
        .arg("--import")
        .arg(&bag)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 vendor(s)"));

    assert!(dir.path().join("Handboek_NL.xlsx").is_file());
}

#[test]
fn test_cli_import_rejects_unknown_fields() {
    let dir = TempDir::new().unwrap();
    let bag = dir.path().join("vendors.json");
    fs::write(
        &bag,
        r#"{"project_name": "Handboek", "source_lang": "NL", "target_lang": "EN",
            "vendor_name": "Sibylle de Woot", "phone": "+32 485 12 34 56"}"#,
    )
    .unwrap();

    roster(&dir)
        .arg("--import")
        .arg(&bag)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Importing"));

    assert!(!dir.path().join("Handboek_NL.xlsx").exists());
}
