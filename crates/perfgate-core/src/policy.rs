//! Threshold policy: warning/failure/improvement fractions per metric class.
//!
//! Layering is defaults → overrides carried by the baseline snapshot →
//! an explicit policy file. Every layer is validated as it is applied, so a
//! policy that exists is always usable.

use crate::catalog::MetricDef;
use crate::codec;
use crate::errors::{PerfgateError, PerfgateResult};
use crate::model::MetricClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_MIN_IMPROVEMENT: f64 = 0.05;

/// Degradation fractions for one metric class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub warning: f64,
    pub failure: f64,
    pub min_improvement: f64,
}

impl ThresholdSet {
    pub const fn new(warning: f64, failure: f64, min_improvement: f64) -> Self {
        Self {
            warning,
            failure,
            min_improvement,
        }
    }

    /// Built-in thresholds. RPS has no warning band: warning == failure.
    pub const fn defaults_for(class: MetricClass) -> Self {
        match class {
            MetricClass::Rps => Self::new(0.10, 0.10, DEFAULT_MIN_IMPROVEMENT),
            MetricClass::Latency => Self::new(0.10, 0.20, DEFAULT_MIN_IMPROVEMENT),
            MetricClass::Resources => Self::new(0.10, 0.20, DEFAULT_MIN_IMPROVEMENT),
        }
    }

    pub fn validate(&self, class: MetricClass) -> PerfgateResult<()> {
        for (name, value) in [
            ("warning", self.warning),
            ("failure", self.failure),
            ("min_improvement", self.min_improvement),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PerfgateError::invalid_policy(format!(
                    "{class}.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.warning > self.failure {
            return Err(PerfgateError::invalid_policy(format!(
                "{class}: warning threshold {} exceeds failure threshold {}",
                self.warning, self.failure
            )));
        }
        Ok(())
    }
}

/// Partial thresholds; unset fields inherit from the layer below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdOverride {
    #[serde(
        default,
        alias = "warning_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub warning: Option<f64>,
    #[serde(
        default,
        alias = "failure_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub failure: Option<f64>,
    #[serde(
        default,
        alias = "min_improvement_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_improvement: Option<f64>,
}

impl ThresholdOverride {
    pub fn apply(&self, base: ThresholdSet) -> ThresholdSet {
        ThresholdSet {
            warning: self.warning.unwrap_or(base.warning),
            failure: self.failure.unwrap_or(base.failure),
            min_improvement: self.min_improvement.unwrap_or(base.min_improvement),
        }
    }
}

/// Overrides as they appear on disk, keyed by class name.
pub type RawThresholdOverrides = BTreeMap<String, ThresholdOverride>;

/// Overrides keyed by resolved class.
pub type ThresholdOverrides = BTreeMap<MetricClass, ThresholdOverride>;

/// Resolve class names. Two keys naming the same class (`rps` and
/// `throughput`) are rejected.
pub fn parse_overrides(raw: &RawThresholdOverrides) -> PerfgateResult<ThresholdOverrides> {
    let mut seen: BTreeMap<MetricClass, &str> = BTreeMap::new();
    let mut out = ThresholdOverrides::new();
    for (name, ov) in raw {
        let class = name
            .parse::<MetricClass>()
            .map_err(PerfgateError::invalid_policy)?;
        if let Some(first) = seen.insert(class, name.as_str()) {
            return Err(PerfgateError::invalid_policy(format!(
                "'{first}' and '{name}' both configure metric class '{class}'"
            )));
        }
        out.insert(class, *ov);
    }
    Ok(out)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdPolicy {
    sets: BTreeMap<MetricClass, ThresholdSet>,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        let sets = MetricClass::ALL
            .into_iter()
            .map(|class| (class, ThresholdSet::defaults_for(class)))
            .collect();
        Self { sets }
    }
}

impl ThresholdPolicy {
    /// Apply one override layer on top of the current policy.
    pub fn with_overrides(mut self, overrides: &ThresholdOverrides) -> PerfgateResult<Self> {
        for (class, ov) in overrides {
            let next = ov.apply(self.resolve(*class));
            next.validate(*class)?;
            self.sets.insert(*class, next);
        }
        Ok(self)
    }

    pub fn resolve(&self, class: MetricClass) -> ThresholdSet {
        self.sets
            .get(&class)
            .copied()
            .unwrap_or_else(|| ThresholdSet::defaults_for(class))
    }
}

/// Contents of a `--thresholds` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    #[serde(default)]
    pub thresholds: RawThresholdOverrides,
    /// Extra or redefined metric names.
    #[serde(default)]
    pub metrics: BTreeMap<String, MetricDef>,
}

impl PolicyFile {
    pub fn load(path: &Path) -> PerfgateResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            PerfgateError::invalid_policy(format!("cannot read {}: {}", path.display(), e))
        })?;
        let file: PolicyFile = codec::decode(path, &bytes)
            .map_err(|e| PerfgateError::invalid_policy(format!("{}: {}", path.display(), e)))?;
        tracing::info!(
            path = %path.display(),
            classes = file.thresholds.len(),
            metrics = file.metrics.len(),
            "loaded threshold policy"
        );
        Ok(file)
    }

    pub fn overrides(&self) -> PerfgateResult<ThresholdOverrides> {
        parse_overrides(&self.thresholds)
    }
}
