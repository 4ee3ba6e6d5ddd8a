//! Reader for the benchmark harness's current-run results.
//!
//! Scenario and metric order is preserved from the input document. Metric
//! values that are not numbers (the harness writes `"N/A"` for failed runs)
//! are kept as `None` so the aggregator can count them as skipped.

use crate::codec;
use crate::errors::{PerfgateError, PerfgateResult};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub name: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResult {
    pub name: String,
    pub metrics: Vec<MetricSample>,
}

impl ScenarioResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metrics: Vec::new(),
        }
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.push(MetricSample {
            name: name.into(),
            value: Some(value),
        });
        self
    }

    pub fn with_missing(mut self, name: impl Into<String>) -> Self {
        self.metrics.push(MetricSample {
            name: name.into(),
            value: None,
        });
        self
    }

    /// Metrics that carry a numeric value, in input order.
    pub fn numeric(&self) -> impl Iterator<Item = (&str, f64)> {
        self.metrics
            .iter()
            .filter_map(|m| m.value.map(|v| (m.name.as_str(), v)))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentResults {
    pub scenarios: Vec<ScenarioResult>,
    pub version: Option<String>,
    pub commit: Option<String>,
    pub environment: Option<Value>,
}

impl CurrentResults {
    pub fn new(scenarios: Vec<ScenarioResult>) -> Self {
        Self {
            scenarios,
            ..Default::default()
        }
    }

    pub fn load(path: &Path) -> PerfgateResult<Self> {
        let bytes =
            std::fs::read(path).map_err(|e| PerfgateError::results_parse(path, e.to_string()))?;
        let results = Self::from_slice(path, &bytes)?;
        tracing::info!(
            path = %path.display(),
            scenarios = results.scenarios.len(),
            "loaded current results"
        );
        Ok(results)
    }

    /// Parse a document; `path` selects JSON or YAML and labels errors.
    pub fn from_slice(path: &Path, bytes: &[u8]) -> PerfgateResult<Self> {
        let raw: RawResults =
            codec::decode(path, bytes).map_err(|e| PerfgateError::results_parse(path, e))?;
        Ok(raw.into())
    }
}

#[derive(Deserialize)]
struct RawResults {
    #[serde(alias = "scenarios")]
    test_scenarios: Vec<RawScenario>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    commit: Option<RawCommit>,
    #[serde(default)]
    environment: Option<Value>,
}

#[derive(Deserialize)]
struct RawScenario {
    name: String,
    #[serde(default, alias = "metrics")]
    results: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCommit {
    Sha(String),
    Detailed {
        #[serde(default)]
        sha: Option<String>,
    },
}

impl From<RawResults> for CurrentResults {
    fn from(raw: RawResults) -> Self {
        let scenarios = raw
            .test_scenarios
            .into_iter()
            .map(|s| ScenarioResult {
                name: s.name,
                metrics: s
                    .results
                    .into_iter()
                    .map(|(name, v)| MetricSample {
                        value: numeric_value(&v),
                        name,
                    })
                    .collect(),
            })
            .collect();
        let commit = raw.commit.and_then(|c| match c {
            RawCommit::Sha(sha) => Some(sha),
            RawCommit::Detailed { sha } => sha,
        });
        Self {
            scenarios,
            version: raw.version,
            commit,
            environment: raw.environment,
        }
    }
}

/// A bare number or `{"value": <number>}`; anything else has no value.
fn numeric_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::Object(map) => match map.get("value") {
            Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()),
            _ => None,
        },
        _ => None,
    }
}
