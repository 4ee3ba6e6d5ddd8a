//! Machine-readable report.
//!
//! The document mirrors [`Report`] and adds a schema version and provenance
//! so downstream tooling can tell which baseline a verdict was made against.

use crate::aggregate::{Report, Summary};
use crate::baseline::BaselineStore;
use crate::errors::{PerfgateError, PerfgateResult};
use crate::model::{ComparisonResult, OverallStatus};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub tool_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_results: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<String>,
    /// `sha256:<hex>` of the baseline file bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_commit: Option<String>,
}

impl Provenance {
    pub fn new(current_results: Option<&Path>, baseline: Option<&BaselineStore>) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            current_results: current_results.map(|p| p.display().to_string()),
            baseline: baseline
                .and_then(|b| b.source())
                .map(|p| p.display().to_string()),
            baseline_digest: baseline.and_then(|b| b.digest()).map(str::to_string),
            baseline_commit: baseline.and_then(|b| b.snapshot().commit.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub schema_version: u32,
    pub status: OverallStatus,
    pub summary: Summary,
    pub regressions: Vec<ComparisonResult>,
    pub warnings: Vec<ComparisonResult>,
    pub improvements: Vec<ComparisonResult>,
    pub neutral: Vec<ComparisonResult>,
    pub provenance: Provenance,
}

impl JsonReport {
    pub fn new(report: &Report, provenance: Provenance) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            status: report.status,
            summary: report.summary(),
            regressions: report.regressions.clone(),
            warnings: report.warnings.clone(),
            improvements: report.improvements.clone(),
            neutral: report.neutral.clone(),
            provenance,
        }
    }

    pub fn to_json_string(&self) -> PerfgateResult<String> {
        serde_json::to_string_pretty(self)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| PerfgateError::io(Path::new("<report>"), e.to_string()))
    }
}
