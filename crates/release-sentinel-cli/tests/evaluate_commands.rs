// crates/release-sentinel-cli/tests/evaluate_commands.rs
// ============================================================================
// Module: CLI Evaluate Command Tests
// Description: Integration tests for plan evaluation through the binary.
// Purpose: Ensure rendering, exit codes, signals, and audit output behave end to end.
// Dependencies: release-sentinel binary
// ============================================================================

//! ## Overview
//! Runs the CLI binary against temporary policy, plan, and snapshot files and
//! checks stdout, stderr, and the process exit code.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Policy document shared by evaluate tests.
const POLICIES: &str = "\
default_max_risk: medium
services:
  - service: api
    max_risk: 2
  - service: web
    max_risk: high
    require_canary: true
";

/// Plan that passes every gate under `POLICIES`.
const PLAN_ALLOWED: &str = "\
id: rel-ok
environment: production
requested_by: me@example.com
at: '2025-01-01T00:00:00Z'
services:
  - name: api
    risk: 1
  - name: web
    risk: low
    mode: canary
";

/// Plan with one risk-ceiling and one canary denial under `POLICIES`.
const PLAN_DENIED: &str = "\
id: rel-bad
environment: production
requested_by: me@example.com
at: '2025-01-01T00:00:00Z'
services:
  - name: api
    risk: 4
  - name: web
    risk: low
";

/// Returns the path to the compiled CLI binary.
fn sentinel_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_release-sentinel"))
}

/// Writes a fixture file into the temp directory.
fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// Builds a CLI command with sentinel environment variables cleared.
fn sentinel(args: &[&str]) -> Command {
    let mut command = Command::new(sentinel_bin());
    command
        .args(args)
        .env_remove("RELEASE_SENTINEL_FREEZE")
        .env_remove("RELEASE_SENTINEL_POLICIES")
        .env_remove("RELEASE_SENTINEL_LANG");
    command
}

/// Runs the CLI and captures its output.
fn run(args: &[&str]) -> Output {
    sentinel(args).output().expect("run release-sentinel")
}

/// Decodes captured output as lossy UTF-8.
fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies an allowed plan renders a table and exits 0.
#[test]
fn evaluate_allowed_plan_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let policies = write(dir.path(), "policies.yaml", POLICIES);
    let plan = write(dir.path(), "plan.yaml", PLAN_ALLOWED);

    let output =
        run(&["evaluate", plan.to_str().unwrap(), "--policies", policies.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", text(&output.stderr));
    let stdout = text(&output.stdout);
    assert!(stdout.contains("Release Plan rel-ok (production)"), "{stdout}");
    assert!(stdout.contains("| api     | yes     | ok     |"), "{stdout}");
}

/// Verifies a denied plan reports reasons and exits 2.
#[test]
fn evaluate_denied_plan_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let policies = write(dir.path(), "policies.yaml", POLICIES);
    let plan = write(dir.path(), "plan.yaml", PLAN_DENIED);

    let output = run(&["evaluate", plan.to_str().unwrap(), "-p", policies.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stdout = text(&output.stdout);
    assert!(stdout.contains("risk 4 exceeds max 2"), "{stdout}");
    assert!(stdout.contains("canary required by policy but plan uses direct rollout"), "{stdout}");
}

/// Verifies JSON output mirrors the evaluation result.
#[test]
fn evaluate_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let policies = write(dir.path(), "policies.yaml", POLICIES);
    let plan = write(dir.path(), "plan.yaml", PLAN_DENIED);

    let output = run(&[
        "evaluate",
        plan.to_str().unwrap(),
        "--policies",
        policies.to_str().unwrap(),
        "--format",
        "json",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["plan_id"], "rel-bad");
    assert_eq!(value["overall_allowed"], false);
    assert_eq!(value["decisions"][0]["service"], "api");
    assert_eq!(value["decisions"][0]["denied_by"], "risk_ceiling");
    assert_eq!(value["decisions"][1]["denied_by"], "canary_required");
}

/// Verifies snapshot signals feed the evaluation.
#[test]
fn evaluate_uses_signal_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let policies = write(dir.path(), "policies.yaml", POLICIES);
    let plan = write(dir.path(), "plan.yaml", PLAN_ALLOWED);
    let signals = write(
        dir.path(),
        "signals.json",
        r#"{"signals":[{"service":"api","slo_breached":true}]}"#,
    );

    let output = run(&[
        "evaluate",
        plan.to_str().unwrap(),
        "--policies",
        policies.to_str().unwrap(),
        "--signals",
        signals.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(text(&output.stdout).contains("SLO is currently breached"));
}

/// Verifies the environment freeze flag denies every service.
#[test]
fn evaluate_honors_freeze_flag() {
    let dir = tempfile::tempdir().unwrap();
    let policies = write(dir.path(), "policies.yaml", POLICIES);
    let plan = write(dir.path(), "plan.yaml", PLAN_ALLOWED);

    let output = sentinel(&["evaluate", plan.to_str().unwrap(), "-p", policies.to_str().unwrap()])
        .env("RELEASE_SENTINEL_FREEZE", "yes")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(text(&output.stdout).matches("deployment freeze active").count(), 2);
    assert!(text(&output.stderr).contains("RELEASE_SENTINEL_FREEZE"));
}

/// Verifies the policy path falls back to the environment variable.
#[test]
fn evaluate_reads_policies_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let policies = write(dir.path(), "custom.yaml", POLICIES);
    let plan = write(dir.path(), "plan.yaml", PLAN_ALLOWED);

    let output = sentinel(&["evaluate", plan.to_str().unwrap()])
        .env("RELEASE_SENTINEL_POLICIES", &policies)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", text(&output.stderr));
}

/// Verifies the audit log receives one JSON line per evaluation.
#[test]
fn evaluate_appends_audit_record() {
    let dir = tempfile::tempdir().unwrap();
    let policies = write(dir.path(), "policies.yaml", POLICIES);
    let plan = write(dir.path(), "plan.yaml", PLAN_DENIED);
    let audit = dir.path().join("audit.jsonl");

    let output = run(&[
        "evaluate",
        plan.to_str().unwrap(),
        "--policies",
        policies.to_str().unwrap(),
        "--audit-log",
        audit.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(2));
    let contents = fs::read_to_string(&audit).unwrap();
    let record: Value = serde_json::from_str(contents.trim()).unwrap();
    assert_eq!(record["event"], "plan_evaluation");
    assert_eq!(record["plan_id"], "rel-bad");
    assert_eq!(record["services_total"], 2);
    assert_eq!(record["denied"].as_array().map(Vec::len), Some(2));
}

/// Verifies invalid plans fail closed with exit code 1.
#[test]
fn evaluate_invalid_plan_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let policies = write(dir.path(), "policies.yaml", POLICIES);
    let plan = write(dir.path(), "plan.yaml", "id: rel-x\nenvironment: prod\n");

    let output =
        run(&["evaluate", plan.to_str().unwrap(), "--policies", policies.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(text(&output.stderr).contains("Failed to load release plan"));
}

/// Verifies a missing policy file fails closed with exit code 1.
#[test]
fn evaluate_missing_policies_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let plan = write(dir.path(), "plan.yaml", PLAN_ALLOWED);
    let missing = dir.path().join("absent.yaml");

    let output =
        run(&["evaluate", plan.to_str().unwrap(), "--policies", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).contains("Failed to load policies"));
}
