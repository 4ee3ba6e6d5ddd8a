use perfgate_core::update::{backup_path_for, diff_snapshots, update_baseline, UpdateOptions};
use perfgate_core::{BaselineStore, CurrentResults};
use std::path::Path;

fn results(rps: f64) -> CurrentResults {
    let json = format!(
        r#"{{
  "version": "2.2.0",
  "commit": {{"sha": "feedface"}},
  "environment": {{"os": "ubuntu-latest"}},
  "test_scenarios": [
    {{"name": "low_concurrent", "results": {{"rps": {{"value": {rps}}}, "latency_avg": {{"value": "N/A"}}}}}}
  ]
}}"#
    );
    CurrentResults::from_slice(Path::new("results.json"), json.as_bytes()).unwrap()
}

#[test]
fn first_update_creates_baseline_without_backup() {
    let dir = tempfile::tempdir().unwrap();
    let baseline = dir.path().join("docs/performance/baseline.json");
    let mut options = UpdateOptions::new(&baseline);
    options.history_path = Some(dir.path().join("docs/performance/baseline-history.json"));

    let outcome = update_baseline(&results(17798.0), &options).unwrap();
    assert!(outcome.previous.is_none());
    assert!(outcome.backup_path.is_none());
    assert_eq!(outcome.history_entries, Some(1));

    let store = BaselineStore::load(&baseline).unwrap().unwrap();
    let snap = store.snapshot();
    assert_eq!(snap.version.as_deref(), Some("2.2.0"));
    assert_eq!(snap.commit.as_deref(), Some("feedface"));
    assert_eq!(snap.baseline["low_concurrent"].get("rps"), Some(&17798.0));
    assert!(!snap.baseline["low_concurrent"].contains_key("latency_avg"));
    assert!(snap.date.as_deref().unwrap().ends_with('Z'));
}

#[test]
fn second_update_backs_up_and_keeps_thresholds() {
    let dir = tempfile::tempdir().unwrap();
    let baseline = dir.path().join("baseline.json");
    std::fs::write(
        &baseline,
        r#"{"baseline": {"low_concurrent": {"rps": 17000}},
            "thresholds": {"rps": {"failure": 0.2}}}"#,
    )
    .unwrap();

    let mut options = UpdateOptions::new(&baseline);
    options.commit = Some("0123abc".into());
    let outcome = update_baseline(&results(18700.0), &options).unwrap();

    let backup = backup_path_for(&baseline);
    assert_eq!(outcome.backup_path.as_deref(), Some(backup.as_path()));
    assert!(std::fs::read_to_string(&backup).unwrap().contains("17000"));

    assert_eq!(outcome.snapshot.commit.as_deref(), Some("0123abc"));
    assert!(outcome.snapshot.thresholds.contains_key("rps"));

    let previous = outcome.previous.unwrap();
    let deltas = diff_snapshots(&previous, &outcome.snapshot);
    assert_eq!(deltas.len(), 1);
    assert!((deltas[0].change_percent.unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn no_backup_leaves_no_backup_file() {
    let dir = tempfile::tempdir().unwrap();
    let baseline = dir.path().join("baseline.json");
    std::fs::write(&baseline, r#"{"baseline": {}}"#).unwrap();

    let mut options = UpdateOptions::new(&baseline);
    options.backup = false;
    update_baseline(&results(1.0), &options).unwrap();
    assert!(!backup_path_for(&baseline).exists());
}

#[test]
fn corrupt_existing_baseline_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let baseline = dir.path().join("baseline.json");
    std::fs::write(&baseline, "{ not json").unwrap();

    let err = update_baseline(&results(1.0), &UpdateOptions::new(&baseline)).unwrap_err();
    assert_eq!(err.reason_code(), "E_BASELINE_INVALID");
    assert_eq!(std::fs::read_to_string(&baseline).unwrap(), "{ not json");
}
