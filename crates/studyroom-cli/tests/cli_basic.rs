//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run with HOME pointed at a scratch
//! directory, so no real configuration or session record is touched.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "studyroom-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("STUDYROOM_ENV")
        .env_remove("GEMINI_API_KEY")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_quiz_on_empty_document_fails_before_generation() {
    let home = TempDir::new().unwrap();
    let doc = home.path().join("empty.txt");
    std::fs::write(&doc, "   \n").unwrap();

    let (_, stderr, code) = run_cli(home.path(), &["quiz", doc.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no contents"), "stderr: {stderr}");
}

#[test]
fn test_unsupported_document_format() {
    let home = TempDir::new().unwrap();
    let doc = home.path().join("notes.pdf");
    std::fs::write(&doc, "binary").unwrap();

    let (_, stderr, code) = run_cli(home.path(), &["topics", doc.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unsupported document format: .pdf"), "stderr: {stderr}");
}

#[test]
fn test_zero_flashcards_rejected() {
    let home = TempDir::new().unwrap();
    let doc = home.path().join("notes.md");
    std::fs::write(&doc, "# Cells\nThe basic unit of life.").unwrap();

    let (_, stderr, code) = run_cli(
        home.path(),
        &["flashcards", doc.to_str().unwrap(), "--count", "0"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("at least 1"), "stderr: {stderr}");
}

#[test]
fn test_config_list_is_json() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0, "config list failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["timer"]["work_minutes"], 25);
    assert_eq!(parsed["generation"]["flashcard_count"], 15);
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.goal", "6"]);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "timer.goal"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "6");
}

#[test]
fn test_config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "timer.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_timer_status_starts_at_zero() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["timer", "status", "--json"]);
    assert_eq!(code, 0, "timer status failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["completed_today"], 0);
    assert_eq!(parsed["goal"], 4);
    assert_eq!(parsed["running"], false);
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("studyroom-cli"));
}
