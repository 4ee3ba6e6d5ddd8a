//! Baseline snapshots and lookup.
//!
//! A missing baseline file is the normal bootstrap state and loads as
//! `None`. A file that exists but does not parse is a hard error.

use crate::codec;
use crate::errors::{PerfgateError, PerfgateResult};
use crate::policy::{parse_overrides, RawThresholdOverrides, ThresholdOverrides};
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Metric name → reference value for one scenario.
pub type ScenarioBaseline = BTreeMap<String, f64>;

/// Serialized baseline document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// When the snapshot was recorded (RFC3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,

    /// Non-numeric metric values (such as `"N/A"` or `null`) are dropped on
    /// load, so those pairs count as skipped instead of failing the file.
    #[serde(deserialize_with = "lenient_scenarios")]
    pub baseline: BTreeMap<String, ScenarioBaseline>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub thresholds: RawThresholdOverrides,

    /// Free-form description of the machine the baseline was taken on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<serde_json::Value>,
}

impl BaselineSnapshot {
    pub fn scenario(&self, name: &str) -> Option<&ScenarioBaseline> {
        self.baseline.get(name)
    }

    pub fn save(&self, path: &Path) -> PerfgateResult<()> {
        let content = codec::encode(path, self).map_err(|e| PerfgateError::io(path, e))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PerfgateError::io(path, e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| PerfgateError::io(path, e.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetricValue {
    Number(f64),
    Other(serde::de::IgnoredAny),
}

fn lenient_scenarios<'de, D>(d: D) -> Result<BTreeMap<String, ScenarioBaseline>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, BTreeMap<String, RawMetricValue>> = BTreeMap::deserialize(d)?;
    Ok(raw
        .into_iter()
        .map(|(scenario, metrics)| {
            let metrics: ScenarioBaseline = metrics
                .into_iter()
                .filter_map(|(metric, value)| match value {
                    RawMetricValue::Number(v) => Some((metric, v)),
                    RawMetricValue::Other(_) => {
                        tracing::debug!(%scenario, %metric, "non-numeric baseline value ignored");
                        None
                    }
                })
                .collect();
            (scenario, metrics)
        })
        .collect())
}

/// A loaded, read-only baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineStore {
    source: Option<PathBuf>,
    digest: Option<String>,
    snapshot: BaselineSnapshot,
}

impl BaselineStore {
    /// Load a snapshot from disk. `Ok(None)` means there is no prior data.
    pub fn load(path: &Path) -> PerfgateResult<Option<Self>> {
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "baseline not found; comparison disabled"
            );
            return Ok(None);
        }
        let bytes =
            std::fs::read(path).map_err(|e| PerfgateError::baseline_load(path, e.to_string()))?;
        let store = Self::from_bytes(path, &bytes)?;
        tracing::info!(
            path = %path.display(),
            scenarios = store.snapshot.baseline.len(),
            "loaded baseline"
        );
        Ok(Some(store))
    }

    /// Parse snapshot bytes; `path` selects JSON or YAML and labels errors.
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> PerfgateResult<Self> {
        let snapshot: BaselineSnapshot =
            codec::decode(path, bytes).map_err(|e| PerfgateError::baseline_load(path, e))?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            digest: Some(format!("sha256:{}", hex::encode(Sha256::digest(bytes)))),
            snapshot,
        })
    }

    /// Wrap an in-memory snapshot (no source file, no digest).
    pub fn from_snapshot(snapshot: BaselineSnapshot) -> Self {
        Self {
            source: None,
            digest: None,
            snapshot,
        }
    }

    /// Returns `None` for scenarios the baseline has never seen.
    pub fn lookup(&self, scenario: &str) -> Option<&ScenarioBaseline> {
        self.snapshot.scenario(scenario)
    }

    pub fn snapshot(&self) -> &BaselineSnapshot {
        &self.snapshot
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    pub fn threshold_overrides(&self) -> PerfgateResult<ThresholdOverrides> {
        parse_overrides(&self.snapshot.thresholds)
    }
}
