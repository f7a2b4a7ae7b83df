//! CLI integration tests for Deppy.
//!
//! These run the built binary. Commands that need a Go toolchain are
//! pointed at `sh` through the project config so they run anywhere.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the deppy binary command, isolated from the user's global config.
fn deppy(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("deppy").unwrap();
    cmd.env("HOME", home).env_remove("GOPATH");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write_config(project: &Path, body: &str) {
    fs::create_dir_all(project.join(".deppy")).unwrap();
    fs::write(project.join(".deppy/config.toml"), body).unwrap();
}

// ============================================================================
// General
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let tmp = temp_dir();
    deppy(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("save"))
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("go"));
}

#[test]
fn test_unknown_command_is_usage_error() {
    let tmp = temp_dir();
    deppy(tmp.path())
        .arg("restore")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("restore"));
}

#[test]
fn test_completions_bash() {
    let tmp = temp_dir();
    deppy(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deppy"));
}

// ============================================================================
// deppy path
// ============================================================================

#[cfg(unix)]
#[test]
fn test_path_prints_vendor_workspace() {
    let tmp = temp_dir();

    deppy(tmp.path())
        .arg("path")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::ends_with("/Deps/_workspace\n"));
}

// ============================================================================
// deppy go
// ============================================================================

#[cfg(unix)]
#[test]
fn test_go_runs_with_vendor_gopath() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    fs::create_dir_all(&project).unwrap();
    write_config(&project, "[toolchain]\ngo = \"sh\"\n");
    fs::write(project.join("probe.sh"), "echo \"$GOPATH\"\n").unwrap();

    deppy(tmp.path())
        .args(["go", "probe.sh"])
        .current_dir(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deps/_workspace"));
}

#[cfg(unix)]
#[test]
fn test_go_propagates_exit_code() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    fs::create_dir_all(&project).unwrap();
    write_config(&project, "[toolchain]\ngo = \"sh\"\n");
    fs::write(project.join("fail.sh"), "exit 4\n").unwrap();

    deppy(tmp.path())
        .args(["go", "fail.sh"])
        .current_dir(&project)
        .assert()
        .code(4);
}

#[test]
fn test_go_requires_arguments() {
    let tmp = temp_dir();
    deppy(tmp.path()).arg("go").assert().code(2);
}

// ============================================================================
// deppy save
// ============================================================================

#[test]
fn test_save_outside_a_package_fails() {
    let tmp = temp_dir();
    let project = tmp.path().join("empty");
    fs::create_dir_all(&project).unwrap();

    deppy(tmp.path())
        .args(["save", "-r=false"])
        .current_dir(&project)
        .assert()
        .code(1)
        .stderr(predicate::str::is_empty().not());

    assert!(!project.join("Deps").exists());
}

#[test]
fn test_save_with_missing_go_binary_fails() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    fs::create_dir_all(&project).unwrap();
    write_config(&project, "[toolchain]\ngo = \"/nonexistent/go\"\n");

    deppy(tmp.path())
        .arg("save")
        .current_dir(&project)
        .assert()
        .code(1);

    assert!(!project.join("Deps").exists());
}
