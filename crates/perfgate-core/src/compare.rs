//! Direction-aware comparison of one metric against its baseline.

use crate::catalog::MetricDef;
use crate::model::{ComparisonResult, MetricDirection, Severity};
use crate::policy::ThresholdSet;

/// Sign-normalized fractional change. Positive means worse in either
/// direction, so one set of thresholds serves both.
pub fn degradation(direction: MetricDirection, baseline: f64, current: f64) -> f64 {
    match direction {
        MetricDirection::HigherIsBetter => (baseline - current) / baseline,
        MetricDirection::LowerIsBetter => (current - baseline) / baseline,
    }
}

/// First match wins; all comparisons are strict, so a change exactly on a
/// threshold does not cross it.
pub fn classify(degradation: f64, thresholds: &ThresholdSet) -> Severity {
    if degradation > thresholds.failure {
        Severity::Regression
    } else if degradation > thresholds.warning {
        Severity::Warning
    } else if degradation < -thresholds.min_improvement {
        Severity::Improvement
    } else {
        Severity::Neutral
    }
}

pub fn is_comparable(baseline: f64, current: f64) -> bool {
    baseline.is_finite() && baseline > 0.0 && current.is_finite()
}

/// Compare one (scenario, metric) pair. `None` when the pair cannot be
/// compared (zero, negative or non-finite baseline; non-finite current).
pub fn compare(
    scenario: &str,
    metric: &str,
    def: MetricDef,
    baseline: f64,
    current: f64,
    thresholds: &ThresholdSet,
) -> Option<ComparisonResult> {
    if !is_comparable(baseline, current) {
        return None;
    }
    let d = degradation(def.direction, baseline, current);
    Some(ComparisonResult {
        scenario: scenario.to_string(),
        metric: metric.to_string(),
        class: def.class,
        direction: def.direction,
        baseline,
        current,
        degradation: d,
        change_percent: d * 100.0,
        raw_change_percent: (current - baseline) / baseline * 100.0,
        severity: classify(d, thresholds),
    })
}
