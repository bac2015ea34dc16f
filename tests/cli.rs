//! Integration tests for top-level CLI behavior.
//!
//! Only offline-resolvable behavior is exercised here: argument errors,
//! input validation, and requests the orchestrator answers before touching
//! the network. Engine behavior over real data shapes is covered in
//! `compare_flow.rs` via the fixture host.

use std::process::Command;

fn run_glint(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_glint");
    Command::new(bin).args(args).output().expect("failed to run glint binary")
}

const REPO: &str = "https://gitlab.invalid/group/project";

#[test]
fn help_lists_the_subcommands() {
    let output = run_glint(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("branches"));
    assert!(stdout.contains("compare"));
    assert!(stdout.contains("diff-file"));
}

#[test]
fn compare_help_shows_the_window_flags() {
    let output = run_glint(&["compare", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--from"));
    assert!(stdout.contains("--to"));
    assert!(stdout.contains("--repo-url"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_glint(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn compare_requires_a_repo_url() {
    let output = run_glint(&["compare", "feature", "main"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("--repo-url"));
}

#[test]
fn unparsable_repo_url_is_invalid_input() {
    let output = run_glint(&["branches", "--repo-url", "not a url"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("invalid input"));
}

#[test]
fn repo_url_without_a_project_path_is_invalid_input() {
    let output = run_glint(&["branches", "--repo-url", "https://gitlab.com/"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("invalid input"));
}

#[test]
fn equal_branches_are_rejected_offline() {
    let output = run_glint(&["compare", "--repo-url", REPO, "main", "main"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("invalid input"));
}

#[test]
fn garbage_dates_are_rejected_offline() {
    let output =
        run_glint(&["compare", "--repo-url", REPO, "feature", "main", "--from", "yesterday"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("invalid date"));
}

#[test]
fn inverted_window_prints_an_empty_result_without_network() {
    let output = run_glint(&[
        "compare",
        "--repo-url",
        REPO,
        "feature",
        "main",
        "--from",
        "2024-02-01",
        "--to",
        "2024-01-01",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Only on feature:"));
    assert!(stdout.contains("(none)"));
}

#[test]
fn inverted_window_json_is_a_complete_empty_result() {
    let output = run_glint(&[
        "compare",
        "--repo-url",
        REPO,
        "feature",
        "main",
        "--from",
        "2024-02-01",
        "--to",
        "2024-01-01",
        "--json",
    ]);
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("JSON output should parse");
    assert_eq!(parsed["source_only_commits"], serde_json::json!([]));
    assert_eq!(parsed["dest_only_commits"], serde_json::json!([]));
    assert_eq!(parsed["file_changes"], serde_json::json!([]));
    assert_eq!(parsed["file_changes_unavailable"], serde_json::json!(false));
}

#[test]
fn diff_file_requires_the_path_positional() {
    let output = run_glint(&["diff-file", "--repo-url", REPO, "feature", "main"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.to_lowercase().contains("path"));
}
