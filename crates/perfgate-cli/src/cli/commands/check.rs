use std::path::{Path, PathBuf};

use anyhow::Context;
use perfgate_core::report::json::{JsonReport, Provenance};
use perfgate_core::report::{console, markdown, write_report};
use perfgate_core::{aggregate, BaselineStore, CurrentResults, GateConfig, Report};

use crate::cli::args::{CheckArgs, ReportFormat};
use crate::exit_codes::exit_code_for;

pub fn run(args: CheckArgs) -> anyhow::Result<i32> {
    let current = CurrentResults::load(&args.current).context("loading current results")?;
    let baseline_path = args.baseline_path();
    tracing::debug!(baseline = %baseline_path.display(), "resolved baseline path");
    let baseline = BaselineStore::load(baseline_path).context("loading baseline")?;
    let config = GateConfig::from_sources(baseline.as_ref(), args.thresholds.as_deref())
        .context("building threshold policy")?;

    let report = aggregate(&current, baseline.as_ref(), &config.policy, &config.catalog);
    let provenance = Provenance::new(Some(&args.current), baseline.as_ref());
    emit(&args, &report, provenance)?;

    Ok(exit_code_for(report.status, args.fail_on_regression))
}

fn emit(args: &CheckArgs, report: &Report, provenance: Provenance) -> anyhow::Result<()> {
    let json = || JsonReport::new(report, provenance.clone()).to_json_string();

    match (args.format, args.output.as_deref()) {
        (ReportFormat::Both, Some(out)) => {
            let (md_path, json_path) = both_paths(out);
            write_report(&md_path, &markdown::to_markdown(report))?;
            write_report(&json_path, &json()?)?;
        }
        (ReportFormat::Both, None) => {
            print!("{}", markdown::to_markdown(report));
            println!();
            print!("{}", json()?);
        }
        (format, out) => {
            let content = match format {
                ReportFormat::Json => json()?,
                ReportFormat::Text => console::to_text(report),
                ReportFormat::Markdown | ReportFormat::Both => markdown::to_markdown(report),
            };
            match out {
                Some(path) => write_report(path, &content)?,
                None => print!("{content}"),
            }
        }
    }
    Ok(())
}

/// The JSON sibling of `out`. If `out` already ends in `.json`, the markdown
/// moves to `.md` so the two never overwrite each other.
fn both_paths(out: &Path) -> (PathBuf, PathBuf) {
    let json_path = out.with_extension("json");
    if json_path == out {
        (out.with_extension("md"), json_path)
    } else {
        (out.to_path_buf(), json_path)
    }
}
