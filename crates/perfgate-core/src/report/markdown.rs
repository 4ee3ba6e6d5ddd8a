use super::{format_percent, format_value, section_title};
use crate::aggregate::Report;
use crate::model::{ComparisonResult, OverallStatus, Severity};

fn status_badge(status: OverallStatus) -> &'static str {
    match status {
        OverallStatus::Failure => "❌ FAILURE",
        OverallStatus::Warning => "⚠️ WARNING",
        OverallStatus::Improvement => "🚀 IMPROVEMENT",
        OverallStatus::Pass => "✅ PASS",
        OverallStatus::NoData => "ℹ️ NO DATA",
    }
}

fn section_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Regression => "❌",
        Severity::Warning => "⚠️",
        Severity::Improvement => "🚀",
        Severity::Neutral => "➖",
    }
}

/// Render the report as a PR-comment friendly markdown document.
pub fn to_markdown(report: &Report) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "## Performance Report {}\n\n",
        status_badge(report.status)
    ));

    if report.status == OverallStatus::NoData {
        md.push_str("No baseline available; nothing was compared.\n");
        return md;
    }

    for (severity, results) in report.partitions() {
        if results.is_empty() {
            continue;
        }
        md.push_str(&format!(
            "### {} {} ({})\n\n",
            section_icon(severity),
            section_title(severity),
            results.len()
        ));
        push_table(&mut md, results);
        md.push('\n');
    }

    let summary = report.summary();
    md.push_str("### Summary\n\n");
    md.push_str("| Status | Compared | Regressions | Warnings | Improvements | Unchanged | Skipped |\n");
    md.push_str("|--------|----------|-------------|----------|--------------|-----------|---------|\n");
    md.push_str(&format!(
        "| {} | {} | {} | {} | {} | {} | {} |\n",
        report.status,
        summary.compared,
        summary.regressions,
        summary.warnings,
        summary.improvements,
        summary.neutral,
        summary.skipped
    ));

    md
}

fn push_table(md: &mut String, results: &[ComparisonResult]) {
    md.push_str("| Scenario | Metric | Baseline | Current | Change |\n");
    md.push_str("|----------|--------|----------|---------|--------|\n");
    for r in results {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            escape_markdown_table_cell(&r.scenario),
            escape_markdown_table_cell(&r.metric),
            format_value(r.baseline),
            format_value(r.current),
            format_percent(r.raw_change_percent)
        ));
    }
}

fn escape_markdown_table_cell(input: &str) -> String {
    escape_markdown_text(input).replace('|', "\\|")
}

fn escape_markdown_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\r' | '\n' => out.push(' '),
            '\\' | '`' | '*' | '_' | '[' | ']' | '#' | '<' | '>' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}
