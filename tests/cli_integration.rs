//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the binary to test, isolated from any local or user config.
fn aliash() -> (Command, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();

    let mut cmd = Command::cargo_bin("aliash").unwrap();
    cmd.current_dir(dir.path()).arg("--config").arg(&config);
    (cmd, dir)
}

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    let (mut cmd, _dir) = aliash();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validated alias engine"));
}

#[test]
fn test_version_flag() {
    let (mut cmd, _dir) = aliash();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_exec_requires_lines() {
    let (mut cmd, _dir) = aliash();
    cmd.arg("exec").assert().failure();
}

// ============================================================================
// Alias Command Tests
// ============================================================================

#[test]
fn test_list_without_aliases() {
    let (mut cmd, _dir) = aliash();
    cmd.args(["exec", "alias"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No aliases currently defined"));
}

#[cfg(unix)]
#[test]
fn test_define_then_list() {
    let (mut cmd, _dir) = aliash();
    cmd.args(["exec", "alias ll ls -la", "alias"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Aliases"))
        .stdout(predicate::str::contains("ls -la"));
}

#[test]
fn test_define_console_alias_then_show() {
    let (mut cmd, _dir) = aliash();
    cmd.args(["exec", "alias h help", "alias h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'h' is aliased to 'help'"));
}

#[test]
fn test_alias_dispatches_to_console_command() {
    let (mut cmd, _dir) = aliash();
    cmd.args(["exec", "alias v version", "v"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_reserved_name_is_rejected() {
    let (mut cmd, _dir) = aliash();
    cmd.args(["exec", "alias alias help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'alias' is not a permitted name"));
}

#[test]
fn test_host_program_is_rejected() {
    let (mut cmd, _dir) = aliash();
    cmd.args(["exec", "alias again aliash", "alias"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is not a valid/permitted console or system command"))
        .stdout(predicate::str::contains("No aliases currently defined"));
}

#[test]
fn test_clear_all() {
    let (mut cmd, _dir) = aliash();
    cmd.args(["exec", "alias h help", "alias -c *", "alias"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared all aliases"))
        .stdout(predicate::str::contains("No aliases currently defined"));
}

#[test]
fn test_exit_stops_exec() {
    let (mut cmd, _dir) = aliash();
    cmd.args(["exec", "exit", "alias"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No aliases").not());
}

#[test]
fn test_stdin_session() {
    let (mut cmd, _dir) = aliash();
    cmd.arg("run")
        .write_stdin("alias h help\nalias\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Aliases"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_blocked_pattern_from_config() {
    let (mut cmd, dir) = aliash();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[alias]\nblocked_patterns = [\"^help$\"]\n").unwrap();

    cmd.args(["exec", "alias h help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'help' is not a valid/permitted"));
}

#[test]
fn test_invalid_blocked_pattern_fails() {
    let (mut cmd, dir) = aliash();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[alias]\nblocked_patterns = [\"(\"]\n").unwrap();

    cmd.args(["exec", "alias"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid blocked pattern"));
}

#[test]
fn test_config_shows_effective_values() {
    let (mut cmd, dir) = aliash();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[general]\nmax_alias_depth = 4\n").unwrap();

    cmd.arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("max_alias_depth = 4"))
        .stdout(predicate::str::contains("host_program = \"aliash\""));
}

#[test]
fn test_missing_config_file_fails() {
    let mut cmd = Command::cargo_bin("aliash").unwrap();
    cmd.args(["--config", "/nonexistent/aliash.toml", "exec", "alias"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

// ============================================================================
// Completions Tests
// ============================================================================

#[test]
fn test_completions_bash() {
    let (mut cmd, _dir) = aliash();
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aliash"));
}
