use assert_cmd::Command;
use predicates::prelude::*;

// Helper function to initialize the command to test.
fn cpm() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cpm"))
}

#[test]
fn test_help_command() {
    let mut cmd = cpm();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Fetches package manifests and source files straight from GitHub",
        ));
}

#[test]
fn test_version_flag() {
    let mut cmd = cpm();

    let version = env!("CARGO_PKG_VERSION");
    let expected = format!("cpm {}", version);

    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_no_arguments_shows_usage() {
    let mut cmd = cpm();

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage: cpm"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = cpm();

    cmd.arg("unknown-command-xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: cpm"));
}

#[test]
fn test_install_requires_a_package_name() {
    let mut cmd = cpm();

    cmd.arg("install")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME"));
}

#[test]
fn test_search_requires_a_query() {
    let mut cmd = cpm();

    cmd.arg("search").assert().failure();
}
