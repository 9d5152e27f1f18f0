//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` to assert actual config values, not just process success.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &std::path::Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "info");
    assert_eq!(json["config"]["separators"], "basic");
    assert_eq!(json["config"]["frequency_mode"], "raw");
    assert_eq!(json["config"]["history_capacity"], 50);
    assert_eq!(json["config"]["statistics_capacity"], 100);
    assert!(
        json["config"]["config_file"].is_null(),
        "no config file should be reported"
    );
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordwise.toml"), "separators = \"extended\"\n").unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["separators"], "extended");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with(".wordwise.toml"),
        "should report dotfile: {reported}"
    );
}

#[test]
fn discovers_yaml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("wordwise.yaml"),
        "frequency_mode: alnum-lowercase\nhistory_capacity: 5\n",
    )
    .unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["frequency_mode"], "alnum-lowercase");
    assert_eq!(json["config"]["history_capacity"], 5);
}

#[test]
fn discovers_json_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("wordwise.json"),
        r#"{"statistics_capacity": 7, "max_words": 250}"#,
    )
    .unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["statistics_capacity"], 7);
    assert_eq!(json["config"]["max_words"], 250);
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();
    fs::write(tmp.path().join(".wordwise.toml"), "log_level = \"warn\"\n").unwrap();

    let json = info_json(&nested);

    assert_eq!(json["config"]["log_level"], "warn");
}

#[test]
fn explicit_config_flag_wins() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordwise.toml"), "history_capacity = 10\n").unwrap();
    let explicit = tmp.path().join("custom.toml");
    fs::write(&explicit, "history_capacity = 20\n").unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            explicit.to_str().unwrap(),
            "info",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["config"]["history_capacity"], 20);
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(reported.ends_with("custom.toml"), "got {reported}");
}

#[test]
fn env_var_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordwise.toml"), "separators = \"basic\"\n").unwrap();

    let output = cmd()
        .env("WORDWISE_SEPARATORS", "extended")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["config"]["separators"], "extended");
}

// =============================================================================
// Invalid Configuration
// =============================================================================

#[test]
fn unknown_frequency_mode_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordwise.toml"), "frequency_mode = \"vowels\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn zero_capacity_fails_before_any_command_runs() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordwise.toml"), "history_capacity = 0\n").unwrap();
    fs::write(tmp.path().join("input.txt"), "some words").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("history capacity must be at least 1"));

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "analyze", "input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

// =============================================================================
// Config Affects Commands
// =============================================================================

#[test]
fn configured_separators_apply_to_analyze() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordwise.toml"), "separators = \"extended\"\n").unwrap();
    fs::write(tmp.path().join("input.txt"), "Stop! Go? Wait; now: yes").unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--json",
            "analyze",
            "input.txt",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["word_count"], 5);
    assert_eq!(json["longest_word"], "Stop");
}

#[test]
fn configured_max_words_gates_analyze() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordwise.toml"), "max_words = 2\n").unwrap();
    fs::write(tmp.path().join("input.txt"), "one two three").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "analyze", "input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit: 2"));
}

#[test]
fn max_input_bytes_rejects_large_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordwise.toml"), "max_input_bytes = 8\n").unwrap();
    fs::write(tmp.path().join("input.txt"), "this file is too large").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "analyze", "input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn disable_input_limit_allows_large_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".wordwise.toml"),
        "max_input_bytes = 8\ndisable_input_limit = true\n",
    )
    .unwrap();
    fs::write(tmp.path().join("input.txt"), "this file is too large").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "analyze", "input.txt"])
        .assert()
        .success();
}
