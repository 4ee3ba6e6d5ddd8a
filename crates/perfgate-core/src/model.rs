use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which way a metric moves when performance gets better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// A family of metrics sharing one threshold configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricClass {
    /// Throughput (requests per second, transfer rate).
    #[serde(alias = "throughput")]
    Rps,
    Latency,
    /// Resource usage (CPU, memory).
    #[serde(alias = "resource_usage")]
    Resources,
}

impl MetricClass {
    pub const ALL: [MetricClass; 3] = [Self::Rps, Self::Latency, Self::Resources];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rps => "rps",
            Self::Latency => "latency",
            Self::Resources => "resources",
        }
    }
}

impl fmt::Display for MetricClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rps" | "throughput" => Ok(Self::Rps),
            "latency" => Ok(Self::Latency),
            "resources" | "resource_usage" => Ok(Self::Resources),
            other => Err(format!(
                "unknown metric class '{other}' (expected rps, latency or resources)"
            )),
        }
    }
}

/// Outcome of one metric comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Regression,
    Warning,
    Improvement,
    Neutral,
}

/// Single verdict for a whole report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Failure,
    Warning,
    Improvement,
    Pass,
    /// No baseline existed, so nothing was compared.
    NoData,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Failure => "failure",
            Self::Warning => "warning",
            Self::Improvement => "improvement",
            Self::Pass => "pass",
            Self::NoData => "no_data",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified (scenario, metric) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub scenario: String,
    pub metric: String,
    pub class: MetricClass,
    pub direction: MetricDirection,
    pub baseline: f64,
    pub current: f64,
    /// Sign-normalized fractional change: positive is worse.
    pub degradation: f64,
    /// `degradation * 100`.
    pub change_percent: f64,
    /// Plain signed change `(current - baseline) / baseline * 100`, for display.
    pub raw_change_percent: f64,
    pub severity: Severity,
}
