//! Promote a run's results to the new baseline.
//!
//! The previous snapshot is optionally backed up next to itself, the new
//! snapshot replaces it, and a bounded history log keeps the most recent
//! snapshots newest-first.

use crate::baseline::{BaselineSnapshot, BaselineStore};
use crate::errors::{PerfgateError, PerfgateResult};
use crate::report::format_percent;
use crate::results::CurrentResults;
use chrono::{SecondsFormat, Utc};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_HISTORY: usize = 30;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOptions {
    pub baseline_path: PathBuf,
    /// `None` disables the history log.
    pub history_path: Option<PathBuf>,
    pub version: Option<String>,
    pub commit: Option<String>,
    pub backup: bool,
    pub max_history: usize,
}

impl UpdateOptions {
    pub fn new(baseline_path: impl Into<PathBuf>) -> Self {
        Self {
            baseline_path: baseline_path.into(),
            history_path: None,
            version: None,
            commit: None,
            backup: true,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub snapshot: BaselineSnapshot,
    pub previous: Option<BaselineSnapshot>,
    pub backup_path: Option<PathBuf>,
    /// Number of entries in the history log after the update.
    pub history_entries: Option<usize>,
}

/// Build a snapshot from results. Scenarios without a single numeric
/// metric are left out.
pub fn snapshot_from_results(
    results: &CurrentResults,
    version: Option<&str>,
    commit: Option<&str>,
    date: String,
) -> BaselineSnapshot {
    let mut snapshot = BaselineSnapshot {
        version: Some(
            version
                .or(results.version.as_deref())
                .unwrap_or(UNKNOWN)
                .to_string(),
        ),
        date: Some(date),
        commit: Some(
            commit
                .or(results.commit.as_deref())
                .unwrap_or(UNKNOWN)
                .to_string(),
        ),
        environment: results.environment.clone(),
        ..Default::default()
    };
    for scenario in &results.scenarios {
        let metrics: crate::baseline::ScenarioBaseline = scenario
            .numeric()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        if !metrics.is_empty() {
            snapshot.baseline.insert(scenario.name.clone(), metrics);
        }
    }
    snapshot
}

pub fn backup_path_for(baseline: &Path) -> PathBuf {
    let mut name = OsString::from(baseline.as_os_str());
    name.push(".backup");
    PathBuf::from(name)
}

pub fn update_baseline(
    results: &CurrentResults,
    options: &UpdateOptions,
) -> PerfgateResult<UpdateOutcome> {
    let path = options.baseline_path.as_path();
    let previous = BaselineStore::load(path)?.map(|store| store.snapshot().clone());

    let date = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut snapshot = snapshot_from_results(
        results,
        options.version.as_deref(),
        options.commit.as_deref(),
        date,
    );
    if let Some(prev) = &previous {
        snapshot.thresholds = prev.thresholds.clone();
    }

    let mut backup_path = None;
    if options.backup && previous.is_some() {
        let target = backup_path_for(path);
        std::fs::copy(path, &target).map_err(|e| PerfgateError::io(&target, e.to_string()))?;
        tracing::info!(path = %target.display(), "previous baseline backed up");
        backup_path = Some(target);
    }

    snapshot.save(path)?;
    tracing::info!(
        path = %path.display(),
        scenarios = snapshot.baseline.len(),
        "baseline updated"
    );

    let history_entries = match &options.history_path {
        Some(history) => Some(append_history(history, &snapshot, options.max_history)?),
        None => None,
    };

    Ok(UpdateOutcome {
        snapshot,
        previous,
        backup_path,
        history_entries,
    })
}

/// Prepend `snapshot` to the JSON-array history at `path`, keeping at most
/// `max_entries`. A missing or unreadable history starts a new one.
pub fn append_history(
    path: &Path,
    snapshot: &BaselineSnapshot,
    max_entries: usize,
) -> PerfgateResult<usize> {
    let mut history: Vec<serde_json::Value> = match std::fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "history unreadable; starting fresh");
            Vec::new()
        }),
        Err(_) => Vec::new(),
    };

    let entry = serde_json::to_value(snapshot).map_err(|e| PerfgateError::io(path, e.to_string()))?;
    history.insert(0, entry);
    history.truncate(max_entries);

    let mut content =
        serde_json::to_string_pretty(&history).map_err(|e| PerfgateError::io(path, e.to_string()))?;
    content.push('\n');
    crate::report::write_report(path, &content)?;
    Ok(history.len())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricDelta {
    pub scenario: String,
    pub metric: String,
    pub old: f64,
    pub new: f64,
    /// `None` when the old value is zero.
    pub change_percent: Option<f64>,
}

/// Metrics present in both snapshots, scenarios and metrics in name order.
pub fn diff_snapshots(old: &BaselineSnapshot, new: &BaselineSnapshot) -> Vec<MetricDelta> {
    let mut deltas = Vec::new();
    for (scenario, new_metrics) in &new.baseline {
        let Some(old_metrics) = old.scenario(scenario) else {
            continue;
        };
        for (metric, &new_value) in new_metrics {
            let Some(&old_value) = old_metrics.get(metric) else {
                continue;
            };
            let change_percent =
                (old_value != 0.0).then(|| (new_value - old_value) / old_value * 100.0);
            deltas.push(MetricDelta {
                scenario: scenario.clone(),
                metric: metric.clone(),
                old: old_value,
                new: new_value,
                change_percent,
            });
        }
    }
    deltas
}

pub fn render_snapshot_diff(deltas: &[MetricDelta]) -> String {
    if deltas.is_empty() {
        return "No metrics in common with the previous baseline.\n".to_string();
    }
    let mut out = String::from("Baseline comparison:\n");
    let mut current_scenario: Option<&str> = None;
    for d in deltas {
        if current_scenario != Some(d.scenario.as_str()) {
            out.push_str(&format!("\n{}\n", d.scenario));
            current_scenario = Some(d.scenario.as_str());
        }
        let change = d
            .change_percent
            .map(format_percent)
            .unwrap_or_else(|| "n/a".to_string());
        out.push_str(&format!(
            "  {}: {:.2} -> {:.2} ({})\n",
            d.metric, d.old, d.new, change
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ScenarioResult;

    fn results() -> CurrentResults {
        CurrentResults {
            scenarios: vec![
                ScenarioResult::new("low_concurrent")
                    .with_metric("rps", 18000.0)
                    .with_missing("latency_avg"),
                ScenarioResult::new("failed").with_missing("rps"),
            ],
            version: Some("2.2.0".into()),
            commit: Some("cafebabe".into()),
            environment: Some(serde_json::json!({"os": "linux"})),
        }
    }

    #[test]
    fn snapshot_prefers_explicit_metadata() {
        let snap = snapshot_from_results(&results(), Some("3.0.0"), None, "now".into());
        assert_eq!(snap.version.as_deref(), Some("3.0.0"));
        assert_eq!(snap.commit.as_deref(), Some("cafebabe"));
        assert_eq!(snap.baseline.len(), 1);
        assert_eq!(snap.baseline["low_concurrent"].len(), 1);

        let bare = snapshot_from_results(&CurrentResults::default(), None, None, "now".into());
        assert_eq!(bare.version.as_deref(), Some("unknown"));
        assert_eq!(bare.commit.as_deref(), Some("unknown"));
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path_for(Path::new("docs/performance/baseline.json")),
            PathBuf::from("docs/performance/baseline.json.backup")
        );
    }

    #[test]
    fn history_is_bounded_and_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        for i in 0..5 {
            let snap = BaselineSnapshot {
                version: Some(format!("v{i}")),
                ..Default::default()
            };
            append_history(&path, &snap, 3).unwrap();
        }
        let history: Vec<BaselineSnapshot> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let versions: Vec<_> = history.iter().filter_map(|s| s.version.as_deref()).collect();
        assert_eq!(versions, ["v4", "v3", "v2"]);
    }

    #[test]
    fn corrupt_history_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{not json").unwrap();
        let count = append_history(&path, &BaselineSnapshot::default(), 30).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn diff_covers_shared_metrics_only() {
        let mut old = BaselineSnapshot::default();
        old.baseline
            .entry("b".into())
            .or_default()
            .insert("rps".into(), 100.0);
        old.baseline
            .entry("a".into())
            .or_default()
            .insert("latency_avg".into(), 0.0);
        let mut new = old.clone();
        new.baseline.get_mut("b").unwrap().insert("rps".into(), 110.0);
        new.baseline
            .get_mut("b")
            .unwrap()
            .insert("cpu_usage".into(), 5.0);

        let deltas = diff_snapshots(&old, &new);
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].scenario, "a");
        assert_eq!(deltas[0].change_percent, None);
        assert!((deltas[1].change_percent.unwrap() - 10.0).abs() < 1e-9);

        let text = render_snapshot_diff(&deltas);
        assert!(text.contains("  rps: 100.00 -> 110.00 (+10.00%)"));
        assert!(text.contains("  latency_avg: 0.00 -> 0.00 (n/a)"));
    }
}
