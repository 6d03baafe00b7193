//! Basic binary invocation tests (assert_cmd).
//!
//! Only `--help`/`--version` are exercised here: a bare invocation starts a
//! real browser.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn setup_cmd() -> Command {
    cargo_bin_cmd!("gmail-oauth-setup")
}

fn helper_cmd() -> Command {
    cargo_bin_cmd!("click-helper")
}

#[test]
fn test_setup_version() {
    let mut cmd = setup_cmd();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gmail-oauth-setup"));
}

#[test]
fn test_setup_help() {
    let mut cmd = setup_cmd();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OAuth Desktop-app client"));
}

#[test]
fn test_helper_version() {
    let mut cmd = helper_cmd();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("click-helper"));
}

#[test]
fn test_helper_help() {
    let mut cmd = helper_cmd();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("screenshot"));
}
