//! update-baseline arguments.

use std::path::PathBuf;

use clap::Parser;

use super::{DEFAULT_BASELINE, DEFAULT_HISTORY};

#[derive(Parser, Clone, Debug)]
pub struct UpdateBaselineArgs {
    /// Current benchmark results to promote
    #[arg(long, short = 'r')]
    pub results: PathBuf,

    #[arg(long, short = 'b', env = "PERFGATE_BASELINE", default_value = DEFAULT_BASELINE)]
    pub baseline: PathBuf,

    #[arg(long, short = 'H', default_value = DEFAULT_HISTORY)]
    pub history: PathBuf,

    /// Version string recorded in the snapshot (default: from results)
    #[arg(long, short = 'v')]
    pub version: Option<String>,

    /// Commit SHA recorded in the snapshot (default: from results)
    #[arg(long, short = 'c')]
    pub commit: Option<String>,

    #[arg(long)]
    pub no_backup: bool,

    #[arg(long)]
    pub no_history: bool,

    #[arg(long, default_value_t = perfgate_core::update::DEFAULT_MAX_HISTORY)]
    pub max_history: usize,

    /// Print a per-metric diff against the previous baseline
    #[arg(long)]
    pub compare: bool,
}
