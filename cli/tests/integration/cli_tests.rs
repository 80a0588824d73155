//! Integration tests for the simdrive command-line surface.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

pub fn simdrive() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("simdrive"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    simdrive().assert().code(2).stderr(predicate::str::contains(
        "Build and run iOS apps on the simulator",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    simdrive()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("devices"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_run_help_shows_device_and_build_flags() {
    simdrive()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--device <UDID>"))
        .stdout(predicate::str::contains("--project-dir <DIR>"))
        .stdout(predicate::str::contains("--build"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    simdrive()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("simdrive"));
}

#[test]
fn test_version_command_shows_version() {
    simdrive()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "simdrive {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = simdrive()
        .args(["version", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_no_color_convention_values_are_accepted() {
    for value in ["1", "", "true"] {
        simdrive()
            .env("NO_COLOR", value)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("simdrive"));
    }
}

#[test]
fn test_no_color_flag_is_accepted() {
    simdrive().args(["--no-color", "version"]).assert().success();
}

#[test]
fn test_unknown_command_is_usage_error() {
    simdrive()
        .arg("teleport")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// --- Missing toolchain ---

#[test]
fn test_devices_without_toolchain_fails() {
    let empty = tempfile::tempdir().expect("tempdir");
    simdrive()
        .arg("devices")
        .env("PATH", empty.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to query iOS simulators"));
}

#[test]
fn test_devices_without_toolchain_json_error_object() {
    let empty = tempfile::tempdir().expect("tempdir");
    let output = simdrive()
        .args(["devices", "--json"])
        .env("PATH", empty.path())
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "toolchain_query");
}
