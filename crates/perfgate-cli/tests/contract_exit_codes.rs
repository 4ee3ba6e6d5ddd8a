#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const BASELINE: &str = r#"{
  "version": "2.1.0",
  "baseline": {
    "low_concurrent": {"rps": 17798, "latency_avg": 518}
  }
}"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn results(rps: f64, latency: f64) -> String {
    format!(
        r#"{{"test_scenarios": [{{"name": "low_concurrent", "results": {{
            "rps": {{"value": {rps}}}, "latency_avg": {{"value": {latency}}}}}}}]}}"#
    )
}

fn perfgate() -> Command {
    let mut cmd = Command::cargo_bin("perfgate").unwrap();
    cmd.env_remove("PERFGATE_BASELINE")
        .env_remove("PERFGATE_THRESHOLDS")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn regression_without_gate_flag_exits_zero() {
    let dir = tempdir().unwrap();
    let baseline = write(dir.path(), "baseline.json", BASELINE);
    let current = write(dir.path(), "current.json", &results(15000.0, 518.0));

    perfgate()
        .arg("check")
        .arg(&current)
        .arg(&baseline)
        .assert()
        .success()
        .stdout(predicate::str::contains("Performance Report ❌ FAILURE"));
}

#[test]
fn regression_with_gate_flag_exits_one() {
    let dir = tempdir().unwrap();
    let baseline = write(dir.path(), "baseline.json", BASELINE);
    let current = write(dir.path(), "current.json", &results(15000.0, 518.0));

    perfgate()
        .args(["check", "--fail-on-regression", "--baseline"])
        .arg(&baseline)
        .arg(&current)
        .assert()
        .code(1);
}

#[test]
fn warning_with_gate_flag_exits_two() {
    let dir = tempdir().unwrap();
    let baseline = write(dir.path(), "baseline.json", BASELINE);
    let current = write(dir.path(), "current.json", &results(17798.0, 600.0));

    perfgate()
        .arg("check")
        .arg(&current)
        .arg(&baseline)
        .arg("--fail-on-regression")
        .assert()
        .code(2);
}

#[test]
fn improvement_with_gate_flag_exits_zero() {
    let dir = tempdir().unwrap();
    let baseline = write(dir.path(), "baseline.json", BASELINE);
    let current = write(dir.path(), "current.json", &results(17798.0, 400.0));

    perfgate()
        .arg("check")
        .arg(&current)
        .arg(&baseline)
        .args(["--fail-on-regression", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Performance check: IMPROVEMENT"));
}

#[test]
fn missing_baseline_is_no_data_and_passes() {
    let dir = tempdir().unwrap();
    let current = write(dir.path(), "current.json", &results(15000.0, 518.0));

    perfgate()
        .arg("check")
        .arg(&current)
        .arg(dir.path().join("absent.json"))
        .args(["--fail-on-regression", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status": "no_data""#));
}

#[test]
fn malformed_baseline_exits_three_without_report() {
    let dir = tempdir().unwrap();
    let baseline = write(dir.path(), "baseline.json", r#"{"baseline": [1, 2]}"#);
    let current = write(dir.path(), "current.json", &results(15000.0, 518.0));
    let output = dir.path().join("report.md");

    perfgate()
        .arg("check")
        .arg(&current)
        .arg(&baseline)
        .arg("--output")
        .arg(&output)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("E_BASELINE_INVALID"));
    assert!(!output.exists());
}

#[test]
fn malformed_results_exit_three() {
    let dir = tempdir().unwrap();
    let baseline = write(dir.path(), "baseline.json", BASELINE);
    let current = write(dir.path(), "current.json", "not json at all");

    perfgate()
        .arg("check")
        .arg(&current)
        .arg(&baseline)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("E_RESULTS_INVALID"));
}

#[test]
fn invalid_threshold_file_exits_three() {
    let dir = tempdir().unwrap();
    let baseline = write(dir.path(), "baseline.json", BASELINE);
    let current = write(dir.path(), "current.json", &results(15000.0, 518.0));
    let thresholds = write(
        dir.path(),
        "thresholds.yaml",
        "thresholds:\n  latency:\n    warning: 0.5\n    failure: 0.2\n",
    );

    perfgate()
        .arg("check")
        .arg(&current)
        .arg(&baseline)
        .arg("--thresholds")
        .arg(&thresholds)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("E_POLICY_INVALID"));
}

#[test]
fn threshold_file_from_env_relaxes_gate() {
    let dir = tempdir().unwrap();
    let baseline = write(dir.path(), "baseline.json", BASELINE);
    let current = write(dir.path(), "current.json", &results(15000.0, 518.0));
    let thresholds = write(
        dir.path(),
        "thresholds.json",
        r#"{"thresholds": {"rps": {"warning": 0.3, "failure": 0.3}}}"#,
    );

    perfgate()
        .arg("check")
        .arg(&current)
        .arg("--fail-on-regression")
        .env("PERFGATE_BASELINE", &baseline)
        .env("PERFGATE_THRESHOLDS", &thresholds)
        .assert()
        .success();
}

#[test]
fn both_format_writes_markdown_and_json() {
    let dir = tempdir().unwrap();
    let baseline = write(dir.path(), "baseline.json", BASELINE);
    let current = write(dir.path(), "current.json", &results(15000.0, 600.0));
    let output = dir.path().join("reports/perf.md");

    perfgate()
        .arg("check")
        .arg(&current)
        .arg(&baseline)
        .args(["--format", "both", "--output"])
        .arg(&output)
        .assert()
        .success();

    let md = fs::read_to_string(&output).unwrap();
    assert!(md.contains("### ❌ Regressions (1)"));
    assert!(md.contains("### ⚠️ Warnings (1)"));

    let json: Value =
        serde_json::from_str(&fs::read_to_string(output.with_extension("json")).unwrap()).unwrap();
    assert_eq!(json["status"], "failure");
    assert_eq!(json["summary"]["regressions"], 1);
    assert_eq!(json["regressions"][0]["metric"], "rps");
    assert!(json["provenance"]["baseline_digest"]
        .as_str()
        .unwrap()
        .starts_with("sha256:"));
}

#[test]
fn usage_errors_exit_three_not_warning() {
    let dir = tempdir().unwrap();
    let current = write(dir.path(), "current.json", &results(15000.0, 518.0));

    perfgate()
        .args(["check", "--format", "pdf"])
        .arg(&current)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("pdf"));

    perfgate().arg("check").assert().code(3);
    perfgate().arg("frobnicate").assert().code(3);
}

#[test]
fn help_and_version_flags_exit_zero() {
    perfgate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("update-baseline"));
    perfgate().arg("--version").assert().success();
}

#[test]
fn version_prints_package_version() {
    perfgate()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
