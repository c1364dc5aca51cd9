#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the calculator-server binary.

use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn run_calculator_server(args: &[&str], env: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_calculator-server"))
        .args(args)
        .envs(env.iter().copied())
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute calculator-server")
}

#[test]
fn test_cli_help_command() {
    let output = run_calculator_server(&["--help"], &[]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--print-config"));
}

#[test]
fn test_cli_version_command() {
    let output = run_calculator_server(&["--version"], &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("calculator-server"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_calculator_server(&["invalid-command"], &[]);
    assert!(!output.status.success(), "Invalid command should fail");
}

#[test]
fn test_cli_check_missing_config_file() {
    let output = run_calculator_server(&["--config", "/nonexistent/config.yaml", "check"], &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "{stderr}");
}

#[test]
fn test_cli_check_invalid_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed").unwrap();

    let output = run_calculator_server(&["--config", config_path.to_str().unwrap(), "check"], &[]);
    assert!(!output.status.success(), "Should fail with invalid YAML");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration"), "{stderr}");
}

#[test]
fn test_cli_check_valid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        "server:\n  port: 9321\nmodules:\n  calculator:\n    max_sessions: 7\n",
    )
    .unwrap();

    let output = run_calculator_server(&["--config", config_path.to_str().unwrap(), "check"], &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("9321"));
    assert!(stdout.contains("max_sessions: 7"));
}

#[test]
fn test_cli_print_config_layers_env_and_flags() {
    let output = run_calculator_server(
        &["--print-config", "--port", "9555"],
        &[("APP__MODULES__CALCULATOR__MAX_DISPLAY_LENGTH", "12")],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 9555"), "{stdout}");
    assert!(stdout.contains("max_display_length: 12"), "{stdout}");
}
