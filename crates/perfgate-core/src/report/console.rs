use super::{format_value, section_title};
use crate::aggregate::Report;
use crate::model::{ComparisonResult, OverallStatus, Severity};

/// Plain terminal rendering, one line per compared metric.
pub fn to_text(report: &Report) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Performance check: {}", report.status.as_str().to_uppercase()));

    if report.status == OverallStatus::NoData {
        lines.push("No baseline available; nothing was compared.".to_string());
        return lines.join("\n") + "\n";
    }

    for (severity, results) in report.partitions() {
        if results.is_empty() || severity == Severity::Neutral {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{}:", section_title(severity)));
        lines.extend(results.iter().map(format_line));
    }

    let summary = report.summary();
    lines.push(String::new());
    lines.push(format!(
        "Summary: {} compared ({} regressions, {} warnings, {} improvements, {} unchanged), {} skipped",
        summary.compared,
        summary.regressions,
        summary.warnings,
        summary.improvements,
        summary.neutral,
        summary.skipped
    ));

    lines.join("\n") + "\n"
}

fn format_line(r: &ComparisonResult) -> String {
    let movement = if r.raw_change_percent < 0.0 {
        "decrease"
    } else {
        "increase"
    };
    format!(
        "  {}/{}: {} -> {} ({:.2}% {})",
        r.scenario,
        r.metric,
        format_value(r.baseline),
        format_value(r.current),
        r.raw_change_percent.abs(),
        movement
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MetricDef;
    use crate::compare::compare;
    use crate::model::{MetricClass, MetricDirection};
    use crate::policy::ThresholdSet;

    #[test]
    fn wording_follows_raw_movement() {
        let def = MetricDef::new(MetricClass::Rps, MetricDirection::HigherIsBetter);
        let t = ThresholdSet::defaults_for(MetricClass::Rps);
        let r = compare("low", "rps", def, 17798.0, 15000.0, &t).unwrap();

        let mut report = Report::no_data();
        report.status = OverallStatus::Failure;
        report.regressions.push(r);

        let text = to_text(&report);
        assert!(text.starts_with("Performance check: FAILURE\n"));
        assert!(text.contains("Regressions:\n  low/rps: 17798 -> 15000 (15.72% decrease)"));
        assert!(text.contains("Summary: 1 compared (1 regressions"));
    }

    #[test]
    fn no_data_text() {
        let text = to_text(&Report::no_data());
        assert!(text.contains("NO_DATA"));
        assert!(text.contains("nothing was compared"));
    }
}
