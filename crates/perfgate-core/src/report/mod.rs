//! Report exporters: markdown for PR comments, JSON for machines, plain
//! text for terminals.

pub mod console;
pub mod json;
pub mod markdown;

use crate::errors::{PerfgateError, PerfgateResult};
use crate::model::Severity;
use std::path::Path;

/// Write a rendered report, creating parent directories.
pub fn write_report(path: &Path, content: &str) -> PerfgateResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PerfgateError::io(path, e.to_string()))?;
    }
    std::fs::write(path, content).map_err(|e| PerfgateError::io(path, e.to_string()))?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

/// Whole numbers print without decimals; everything else with two.
pub(crate) fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn format_percent(percent: f64) -> String {
    format!("{percent:+.2}%")
}

pub(crate) fn section_title(severity: Severity) -> &'static str {
    match severity {
        Severity::Regression => "Regressions",
        Severity::Warning => "Warnings",
        Severity::Improvement => "Improvements",
        Severity::Neutral => "Unchanged",
    }
}
