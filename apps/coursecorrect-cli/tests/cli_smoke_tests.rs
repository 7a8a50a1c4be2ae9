//! CLI smoke tests for the coursecorrect binary
//!
//! These tests verify argument parsing, configuration validation and the
//! commands that complete without talking to any backend.

use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Helper to run the coursecorrect binary with given arguments
fn run_coursecorrect(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_coursecorrect"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute coursecorrect")
}

/// Write a config whose state directory lives inside `dir`, so tests never
/// touch the real user home.
fn write_config(dir: &TempDir) -> String {
    let config_path = dir.path().join("config.yaml");
    let config_content = format!(
        r#"
backend:
  url: "https://project.example.co"
  anon_key: "anon-key-123"
  home_dir: "{}"

logging:
  console_level: error
  file_level: error
"#,
        dir.path().join("state").display()
    );
    std::fs::write(&config_path, config_content).expect("Failed to write config file");
    config_path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_coursecorrect(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("coursecorrect"),
        "Should contain binary name"
    );
    assert!(
        stdout.contains("Usage:") || stdout.contains("USAGE:"),
        "Should contain usage information"
    );
    assert!(stdout.contains("notes"), "Should list the notes subcommand");
    assert!(stdout.contains("quiz"), "Should list the quiz subcommand");
    assert!(
        stdout.contains("dashboard"),
        "Should list the dashboard subcommand"
    );
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_version_command() {
    let output = run_coursecorrect(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("coursecorrect"),
        "Should contain binary name"
    );
    assert!(
        stdout.chars().any(|c| c.is_ascii_digit()),
        "Should contain version numbers"
    );
}

#[test]
fn test_cli_invalid_command() {
    let output = run_coursecorrect(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid") || stderr.contains("unexpected"),
        "Should contain error message about invalid command"
    );
}

#[test]
fn test_cli_no_arguments() {
    let output = run_coursecorrect(&[]);

    assert!(!output.status.success(), "Bare invocation should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("command") || stderr.contains("--help"),
        "Should point at --help: {}",
        stderr
    );
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_coursecorrect(&["--config", "/nonexistent/config.yaml", "logout"]);

    assert!(!output.status.success(), "Should fail with missing config");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not found") || stderr.contains("config"),
        "Should mention config file issue: {}",
        stderr
    );
}

#[test]
fn test_cli_config_flag_short_form() {
    let output = run_coursecorrect(&["-c", "/nonexistent/config.yaml", "logout"]);

    assert!(
        !output.status.success(),
        "Should fail with missing config file"
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");

    std::fs::write(&config_path, "backend: [not, a, mapping").expect("Failed to write file");

    let output = run_coursecorrect(&["--config", config_path.to_str().unwrap(), "logout"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_print_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir);

    let output = run_coursecorrect(&["--config", &config_path, "--print-config"]);

    assert!(output.status.success(), "Should succeed with valid config");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("backend:"), "Should print the backend section");
    assert!(
        stdout.contains("project.example.co"),
        "Should echo the configured URL"
    );
    assert!(
        !stdout.contains("trivia_url: ''"),
        "API defaults should be populated"
    );
}

#[test]
fn test_cli_requires_session_for_collections() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir);

    let output = run_coursecorrect(&["--config", &config_path, "notes", "list"]);

    assert!(!output.status.success(), "Should fail without a session");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Not signed in"),
        "Should tell the user to sign in: {}",
        stderr
    );
}

#[test]
fn test_cli_logout_without_session() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir);

    // Nothing stored and nothing to revoke; still a clean exit.
    let output = run_coursecorrect(&["--config", &config_path, "logout"]);

    assert!(output.status.success(), "Logout should be idempotent");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Signed out"), "Should confirm sign-out");
}

#[test]
fn test_cli_search_rejects_page_zero() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir);

    let output = run_coursecorrect(&["--config", &config_path, "search", "rust", "--page", "0"]);

    assert!(!output.status.success(), "Page 0 should be rejected");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("numbered from 1"),
        "Should explain page numbering: {}",
        stderr
    );
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_coursecorrect(&["notes", "--help"]);
    assert!(output.status.success(), "Notes help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("list"), "Should list notes subcommands");
    assert!(stdout.contains("delete"), "Should list notes subcommands");

    let output = run_coursecorrect(&["todo", "--help"]);
    assert!(output.status.success(), "Todo help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("toggle"), "Should list todo subcommands");
}

#[test]
fn test_cli_verbose_flag() {
    let output = run_coursecorrect(&["--verbose", "--help"]);

    assert!(output.status.success(), "Verbose help should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage:") || stdout.contains("USAGE:"),
        "Should still contain usage information"
    );
}
