//! Roll per-metric comparisons up into a report with one overall status.

use crate::baseline::BaselineStore;
use crate::catalog::MetricCatalog;
use crate::compare::compare;
use crate::model::{ComparisonResult, OverallStatus, Severity};
use crate::policy::ThresholdPolicy;
use crate::results::CurrentResults;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub compared: usize,
    pub regressions: usize,
    pub warnings: usize,
    pub improvements: usize,
    pub neutral: usize,
    pub skipped: usize,
}

/// Comparison results partitioned by severity, each partition in the order
/// the pairs were visited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub status: OverallStatus,
    pub regressions: Vec<ComparisonResult>,
    pub warnings: Vec<ComparisonResult>,
    pub improvements: Vec<ComparisonResult>,
    pub neutral: Vec<ComparisonResult>,
    /// Pairs skipped because they could not be compared.
    pub skipped: usize,
}

impl Report {
    /// Report for a run with no baseline to compare against.
    pub fn no_data() -> Self {
        Self {
            status: OverallStatus::NoData,
            regressions: Vec::new(),
            warnings: Vec::new(),
            improvements: Vec::new(),
            neutral: Vec::new(),
            skipped: 0,
        }
    }

    fn empty() -> Self {
        Self {
            status: OverallStatus::Pass,
            ..Self::no_data()
        }
    }

    fn push(&mut self, result: ComparisonResult) {
        match result.severity {
            Severity::Regression => self.regressions.push(result),
            Severity::Warning => self.warnings.push(result),
            Severity::Improvement => self.improvements.push(result),
            Severity::Neutral => self.neutral.push(result),
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            compared: self.regressions.len()
                + self.warnings.len()
                + self.improvements.len()
                + self.neutral.len(),
            regressions: self.regressions.len(),
            warnings: self.warnings.len(),
            improvements: self.improvements.len(),
            neutral: self.neutral.len(),
            skipped: self.skipped,
        }
    }

    /// All partitions in display order, paired with their severity.
    pub fn partitions(&self) -> [(Severity, &[ComparisonResult]); 4] {
        [
            (Severity::Regression, self.regressions.as_slice()),
            (Severity::Warning, self.warnings.as_slice()),
            (Severity::Improvement, self.improvements.as_slice()),
            (Severity::Neutral, self.neutral.as_slice()),
        ]
    }
}

/// Regression beats warning beats improvement; anything else passes.
pub fn derive_status(report: &Report) -> OverallStatus {
    if !report.regressions.is_empty() {
        OverallStatus::Failure
    } else if !report.warnings.is_empty() {
        OverallStatus::Warning
    } else if !report.improvements.is_empty() {
        OverallStatus::Improvement
    } else {
        OverallStatus::Pass
    }
}

/// Compare every current metric that has a baseline counterpart.
///
/// Scenarios absent from the baseline contribute nothing. Metrics absent
/// from the baseline, unknown to the catalog, or without a usable value on
/// either side are counted in `skipped`.
pub fn aggregate(
    current: &CurrentResults,
    baseline: Option<&BaselineStore>,
    policy: &ThresholdPolicy,
    catalog: &MetricCatalog,
) -> Report {
    let Some(baseline) = baseline else {
        return Report::no_data();
    };

    let mut report = Report::empty();
    for scenario in &current.scenarios {
        let Some(reference) = baseline.lookup(&scenario.name) else {
            tracing::debug!(scenario = %scenario.name, "scenario not in baseline");
            continue;
        };
        for sample in &scenario.metrics {
            let outcome = reference.get(&sample.name).and_then(|base| {
                let def = catalog.resolve(&sample.name)?;
                compare(
                    &scenario.name,
                    &sample.name,
                    def,
                    *base,
                    sample.value?,
                    &policy.resolve(def.class),
                )
            });
            match outcome {
                Some(result) => report.push(result),
                None => {
                    tracing::debug!(
                        scenario = %scenario.name,
                        metric = %sample.name,
                        "metric not comparable; skipped"
                    );
                    report.skipped += 1;
                }
            }
        }
    }
    report.status = derive_status(&report);

    let summary = report.summary();
    tracing::info!(
        status = %report.status,
        compared = summary.compared,
        regressions = summary.regressions,
        warnings = summary.warnings,
        improvements = summary.improvements,
        skipped = summary.skipped,
        "comparison complete"
    );
    report
}
