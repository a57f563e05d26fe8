//! CLI integration tests for the taleforge binary.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn taleforge(data: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("taleforge").unwrap();
    cmd.env("TALEFORGE_DATA", data.path());
    cmd
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    taleforge(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("taleforge"));
}

#[test]
fn help_mentions_data_directory() {
    let dir = TempDir::new().unwrap();
    taleforge(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("TALEFORGE_DATA"));
}

#[test]
fn unknown_flag_is_rejected() {
    let dir = TempDir::new().unwrap();
    taleforge(&dir).arg("--turbo").assert().failure();
}

#[test]
fn corrupt_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), "{ not json").unwrap();

    taleforge(&dir)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("config"));

    let log = fs::read_to_string(dir.path().join("taleforge.log")).unwrap();
    assert!(log.contains("fatal fault"));
    assert!(log.contains("startup"));
}
