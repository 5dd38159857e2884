//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Only
//! offline subcommands are exercised; everything runs against the dev
//! data directory (FOCUSMODE_ENV=dev).

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focusmode-cli", "--"])
        .args(args)
        .env("FOCUSMODE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timer_status() {
    let (stdout, _stderr, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "Timer status failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("timer status should print JSON");
    assert_eq!(parsed["type"], "TimerSnapshot");
}

#[test]
fn test_timer_start_stop() {
    let (_stdout, _stderr, code) = run_cli(&["timer", "reset"]);
    assert_eq!(code, 0, "Timer reset failed");

    let (stdout, _stderr, code) = run_cli(&["timer", "start"]);
    assert_eq!(code, 0, "Timer start failed");
    assert!(stdout.contains("TimerStarted") || stdout.contains("TimerSnapshot"));

    let (stdout, _stderr, code) = run_cli(&["timer", "stop"]);
    assert_eq!(code, 0, "Timer stop failed");
    assert!(stdout.contains("TimerStopped"));
}

#[test]
fn test_guard_status() {
    let (stdout, _stderr, code) = run_cli(&["guard", "status"]);
    assert_eq!(code, 0, "Guard status failed");
    assert!(stdout.contains("GuardSnapshot") || stdout.contains("Penalty"));
}

#[test]
fn test_guard_hidden_then_visible() {
    // Widen the grace window so slow cargo invocations can't commit the
    // penalty before the visible report lands.
    let (_stdout, _stderr, code) = run_cli(&["config", "set", "guard.grace_secs", "3600"]);
    assert_eq!(code, 0, "Config set failed");

    let (_stdout, _stderr, code) = run_cli(&["guard", "reset"]);
    assert_eq!(code, 0, "Guard reset failed");

    let (stdout, _stderr, code) = run_cli(&["guard", "hidden"]);
    assert_eq!(code, 0, "Guard hidden failed");
    assert!(stdout.contains("VisibilityLost"));

    // Immediately visible again: inside the grace window.
    let (stdout, _stderr, code) = run_cli(&["guard", "visible"]);
    assert_eq!(code, 0, "Guard visible failed");
    assert!(stdout.contains("PenaltyCancelled"));

    let (_stdout, _stderr, code) = run_cli(&["guard", "reset"]);
    assert_eq!(code, 0, "Guard reset failed");
}

#[test]
fn test_config_list() {
    let (stdout, _stderr, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("config list should print JSON");
    assert!(parsed["backend"]["http_url"].is_string());
}

#[test]
fn test_config_get() {
    let (stdout, _stderr, code) = run_cli(&["config", "get", "guard.violation_threshold"]);
    assert_eq!(code, 0, "Config get failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_stdout, _stderr, code) = run_cli(&["config", "get", "nope.nothing"]);
    assert_ne!(code, 0, "Unknown key should fail");
}

#[test]
fn test_config_path() {
    let (stdout, _stderr, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "Config path failed");
    assert!(stdout.contains("config.toml"));
}

#[test]
fn test_history() {
    let (stdout, _stderr, code) = run_cli(&["history"]);
    assert_eq!(code, 0, "History failed");
    assert!(stdout.contains("total_checkins"));
}

#[test]
fn test_checkin_bad_score_exits_nonzero() {
    // Fails on validation with a reachable backend, on the status fetch
    // without one. Either way the submission must not go through.
    let (_stdout, _stderr, code) = run_cli(&["checkin", "--score", "eleven", "--minutes", "90"]);
    assert_ne!(code, 0);
}
