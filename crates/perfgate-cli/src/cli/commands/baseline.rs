use anyhow::Context;
use perfgate_core::update::{diff_snapshots, render_snapshot_diff, update_baseline, UpdateOptions};
use perfgate_core::CurrentResults;

use crate::cli::args::UpdateBaselineArgs;
use crate::exit_codes::EXIT_SUCCESS;

pub fn run(args: UpdateBaselineArgs) -> anyhow::Result<i32> {
    let results = CurrentResults::load(&args.results).context("loading current results")?;

    let options = UpdateOptions {
        baseline_path: args.baseline.clone(),
        history_path: (!args.no_history).then(|| args.history.clone()),
        version: args.version.clone(),
        commit: args.commit.clone(),
        backup: !args.no_backup,
        max_history: args.max_history,
    };
    let outcome = update_baseline(&results, &options).context("updating baseline")?;

    if let Some(backup) = &outcome.backup_path {
        println!("Baseline backed up to {}", backup.display());
    }
    println!("Baseline updated: {}", args.baseline.display());
    println!(
        "Version: {}",
        outcome.snapshot.version.as_deref().unwrap_or("unknown")
    );
    println!(
        "Date: {}",
        outcome.snapshot.date.as_deref().unwrap_or("unknown")
    );
    if let Some(entries) = outcome.history_entries {
        println!(
            "History updated: {} ({} entries)",
            args.history.display(),
            entries
        );
    }

    if args.compare {
        match &outcome.previous {
            Some(previous) => {
                println!();
                print!(
                    "{}",
                    render_snapshot_diff(&diff_snapshots(previous, &outcome.snapshot))
                );
            }
            None => println!("No previous baseline to compare against"),
        }
    }

    Ok(EXIT_SUCCESS)
}
