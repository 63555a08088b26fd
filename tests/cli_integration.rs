//! CLI Integration Tests
//!
//! These tests verify that the CLI commands work correctly end-to-end.
//! They test the actual binary behavior, not just the library.
//!
//! Run with:
//! ```bash
//! cargo test --test cli_integration
//! ```

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::tempdir;

/// Run gss with the given args and return (stdout, stderr, success)
fn run_gss(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_gss"))
        .args(args)
        .output()
        .expect("Failed to execute gss");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

/// Write a script into `dir` and run it in JSON mode
fn run_script(dir: &Path, script: &str) -> (Vec<serde_json::Value>, bool) {
    let path = dir.join("script.gss");
    std::fs::write(&path, script).unwrap();

    let (stdout, _stderr, success) = run_gss(&["-f", "json", "run", path.to_str().unwrap()]);
    let values = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect();
    (values, success)
}

// ============================================================================
// Script Execution Tests
// ============================================================================

#[test]
fn test_cli_push_and_top() {
    let dir = tempdir().unwrap();
    let (outputs, success) = run_script(dir.path(), "push 1\npush 2 1\npush 3 1\ntop\n");

    assert!(success, "script should succeed");
    assert_eq!(outputs.len(), 4);
    assert_eq!(outputs[3]["op"], "top");
    assert_eq!(outputs[3]["value"], "3");
}

#[test]
fn test_cli_pop_reports_deletion() {
    let dir = tempdir().unwrap();
    let (outputs, success) = run_script(
        dir.path(),
        "push 1\npush 2 1\npush 3 1\nedge 2 3\npop 1\nfind 2\n",
    );

    assert!(success);
    let pop = &outputs[4];
    assert_eq!(pop["removed"], "3");
    assert_eq!(pop["deleted"], true);
    assert_eq!(outputs[5]["children"], serde_json::json!([]));
}

#[test]
fn test_cli_dump_lists_nodes() {
    let dir = tempdir().unwrap();
    let (outputs, _) = run_script(dir.path(), "push a\ninsert a b\ndump\n");

    let dump = &outputs[2];
    assert_eq!(dump["count"], 2);
    let nodes = dump["nodes"].as_array().unwrap();
    assert!(nodes.contains(&serde_json::json!({"value": "a", "children": ["b"]})));
}

#[test]
fn test_cli_operation_error_sets_exit_code() {
    let dir = tempdir().unwrap();
    let (outputs, success) = run_script(dir.path(), "push a\npop a\nempty\n");

    assert!(!success, "a failed operation should fail the run");
    assert_eq!(outputs.len(), 3, "later lines should still run");
    assert_eq!(outputs[1]["status"], "error");
    assert_eq!(outputs[1]["line"], 2);
    assert_eq!(outputs[2]["empty"], false);
}

#[test]
fn test_cli_parse_error_runs_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.gss");
    std::fs::write(&path, "push a\nshift a\n").unwrap();

    let (stdout, stderr, success) = run_gss(&["run", path.to_str().unwrap()]);

    assert!(!success);
    assert!(stdout.is_empty(), "nothing should execute: {}", stdout);
    assert!(stderr.contains("unknown command"), "got: {}", stderr);
}

#[test]
fn test_cli_missing_script() {
    let (_stdout, stderr, success) = run_gss(&["run", "/nonexistent/script.gss"]);

    assert!(!success);
    assert!(stderr.contains("Failed to read script"));
}

#[test]
fn test_cli_reads_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gss"))
        .args(["run", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to execute gss");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"push x\ntop\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"value\":\"x\""));
}

// ============================================================================
// Demo and Output Format Tests
// ============================================================================

#[test]
fn test_cli_demo() {
    let (stdout, _stderr, success) = run_gss(&["demo"]);

    assert!(success, "demo should succeed even though its last find fails");
    assert!(stdout.contains("\"removed\":\"3\""));
    assert!(stdout.contains("\"message\":\"node not found\""));
}

#[test]
fn test_cli_text_format_is_pretty() {
    let (stdout, _stderr, success) = run_gss(&["-f", "text", "demo"]);

    assert!(success);
    assert!(stdout.contains("\"op\": \"push\""), "got: {}", stdout);
}

#[test]
fn test_cli_verbose_logs_to_stderr() {
    let (stdout, stderr, success) = run_gss(&["--verbose", "demo"]);

    assert!(success);
    assert!(stderr.contains("created node"), "got: {}", stderr);
    assert!(!stdout.contains("created node"));
}
