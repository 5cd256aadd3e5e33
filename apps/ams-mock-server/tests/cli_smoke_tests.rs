#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the ams-mock-server binary.

use std::process::{Command, Stdio};
use std::time::Duration;

use tempfile::TempDir;

fn run_mock_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_ams-mock-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute ams-mock-server")
}

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write file");
    path.to_str().unwrap().to_owned()
}

#[test]
fn test_cli_help_command() {
    let output = run_mock_server(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage:"),
        "Should contain usage information"
    );
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(
        stdout.contains("check"),
        "Should contain 'check' subcommand"
    );
    assert!(stdout.contains("--config"), "Should contain config option");
    assert!(stdout.contains("--print-config"));
}

#[test]
fn test_cli_version_command() {
    let output = run_mock_server(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ams-mock-server"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_mock_server(&["serve-forever"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand"), "{stderr}");
}

#[test]
fn test_cli_missing_config_file() {
    let output = run_mock_server(&["--config", "/nonexistent/ams.yaml", "check"]);
    assert!(!output.status.success(), "Should fail with missing config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "{stderr}");
}

#[test]
fn test_cli_invalid_yaml() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "invalid.yaml", "invalid: yaml: content: [unclosed");
    let output = run_mock_server(&["--config", &config, "check"]);
    assert!(!output.status.success(), "Should fail with invalid YAML");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "{stderr}");
}

#[test]
fn test_cli_unknown_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "ams.yaml", "server:\n  port: 8080\n");
    let output = run_mock_server(&["--config", &config, "check"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_check_valid_config_with_seed() {
    let dir = TempDir::new().unwrap();
    let seed = write(
        &dir,
        "seed.yaml",
        r"
accounts:
  - id: a1
    username: jdoe
    email: jdoe@example.com
organizations:
  - id: o1
    name: Example
",
    );
    let config = write(
        &dir,
        "ams.yaml",
        &format!("server:\n  bind_addr: 127.0.0.1:0\nseed: {seed}\n"),
    );
    let output = run_mock_server(&["--config", &config, "check"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Should succeed: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("127.0.0.1:0"));
}

#[test]
fn test_cli_check_rejects_bad_seed() {
    let dir = TempDir::new().unwrap();
    let seed = write(&dir, "seed.yaml", "clusters:\n  - id: c1\n");
    let config = write(&dir, "ams.yaml", &format!("seed: {seed}\n"));
    let output = run_mock_server(&["--config", &config, "check"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid seed file"), "{stderr}");
}

#[test]
fn test_cli_print_config() {
    let output = run_mock_server(&["--print-config", "-v"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json = stdout
        .strip_prefix("Effective configuration:\n")
        .expect("header");
    let config: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(config["api"]["prefix"], "/api/accounts_mgmt/v1");
    assert_eq!(config["logging"]["level"], "debug");
}

#[tokio::test]
async fn test_cli_run_keeps_serving() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "ams.yaml", "server:\n  bind_addr: 127.0.0.1:0\n");
    let child = tokio::process::Command::new(env!("CARGO_BIN_EXE_ams-mock-server"))
        .args(["--config", &config, "run"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .unwrap();

    // The server only exits on a signal, so the wait must time out.
    let result = tokio::time::timeout(Duration::from_secs(2), child.wait_with_output()).await;
    assert!(result.is_err(), "server exited early: {result:?}");
}
