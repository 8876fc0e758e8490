//! End-to-end tests for the `gexec-probe` binary against real commands.
#![cfg(unix)]

mod common;

use anyhow::Result;
use common::probe_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_fast_target_meets_default_threshold() {
    let assert = probe_cmd().args(["--", "true"]).assert().code(0);

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected stdout: {stdout}");
    assert!(lines[0].starts_with("Average container startup: "));
    assert!(lines[0].ends_with("ms"));
    assert_eq!(lines[1], "✅ Performance target met (<5000ms)");
}

#[test]
fn test_slow_target_misses_threshold() {
    probe_cmd()
        .args(["-n", "2", "--threshold-ms", "0", "--", "sleep", "0.05"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Average container startup: "))
        .stdout(predicate::str::contains("❌ Performance target missed (>0ms)"));
}

#[test]
fn test_missing_tool_exits_with_error() {
    probe_cmd()
        .args(["--", "gexec-probe-no-such-binary", "echo", "test"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "'gexec-probe-no-such-binary' was not found in PATH",
        ));
}

#[test]
fn test_failing_target_aborts_run() {
    probe_cmd()
        .args(["--", "sh", "-c", "echo broken >&2; exit 3"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("exited with status 3"))
        .stderr(predicate::str::contains("broken"));
}

#[test]
fn test_invalid_repetitions_rejected() {
    probe_cmd()
        .args(["--repetitions", "0", "--", "true"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("repetitions must be at least 1"));
}

#[test]
fn test_timeout_aborts_hung_target() {
    probe_cmd()
        .args(["--timeout-secs", "1", "--", "sleep", "30"])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Timed out"));
}

#[test]
fn test_runs_exactly_five_times_by_default() -> Result<()> {
    let dir = TempDir::new()?;
    let log = dir.path().join("calls.log");
    let script = format!("echo call >> '{}'", log.display());

    probe_cmd().args(["--", "sh", "-c", script.as_str()]).assert().code(0);

    assert_eq!(fs::read_to_string(&log)?.lines().count(), 5);
    Ok(())
}

#[test]
fn test_invocations_do_not_overlap() -> Result<()> {
    let dir = TempDir::new()?;
    let log = dir.path().join("order.log");
    let script = format!(
        "echo start >> '{0}'; sleep 0.02; echo end >> '{0}'",
        log.display()
    );

    probe_cmd()
        .args(["-n", "4", "--", "sh", "-c", script.as_str()])
        .assert()
        .code(0);

    let contents = fs::read_to_string(&log)?;
    let events: Vec<&str> = contents.lines().collect();
    assert_eq!(events, ["start", "end"].repeat(4));
    Ok(())
}

#[test]
fn test_config_file_and_json_report() -> Result<()> {
    let dir = TempDir::new()?;
    let config = dir.path().join("probe.yaml");
    fs::write(
        &config,
        "repetitions: 3\nthreshold_ms: 60000\ntarget_command: \"true\"\ntarget_args: []\n",
    )?;

    let assert = probe_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--format", "json"])
        .assert()
        .code(0);

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["samples"].as_array().map(Vec::len), Some(3));
    assert_eq!(report["verdict"], "met");
    assert_eq!(report["threshold_ms"], 60000.0);
    assert_eq!(report["target"], "true");
    Ok(())
}

#[test]
fn test_cli_overrides_config_file() -> Result<()> {
    let dir = TempDir::new()?;
    let config = dir.path().join("probe.yaml");
    let log = dir.path().join("calls.log");
    fs::write(&config, "repetitions: 9\ntarget_command: gexec-probe-no-such-binary\n")?;
    let script = format!("echo call >> '{}'", log.display());

    probe_cmd()
        .arg("--config")
        .arg(&config)
        .args(["-n", "2", "--", "sh", "-c", script.as_str()])
        .assert()
        .code(0);

    assert_eq!(fs::read_to_string(&log)?.lines().count(), 2);
    Ok(())
}

#[test]
fn test_unreadable_config_exits_with_error() {
    probe_cmd()
        .args(["--config", "/nonexistent/probe.yaml", "--", "true"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Failed to load configuration from /nonexistent/probe.yaml: I/O error",
        ));
}

#[test]
fn test_malformed_config_exits_with_error() -> Result<()> {
    let dir = TempDir::new()?;
    let config = dir.path().join("probe.yaml");
    fs::write(&config, "repetitions: [not, a, number]\n")?;

    probe_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--", "true"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Serialization error"));
    Ok(())
}
