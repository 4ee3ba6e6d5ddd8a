use std::path::{Path, PathBuf};

use clap::Parser;

use super::{ReportFormat, DEFAULT_BASELINE};

#[derive(Parser, Clone, Debug)]
pub struct CheckArgs {
    /// Current benchmark results (JSON or YAML)
    pub current: PathBuf,

    /// Baseline snapshot; takes precedence over --baseline
    #[arg(value_name = "BASELINE_PATH")]
    pub baseline_positional: Option<PathBuf>,

    #[arg(long, env = "PERFGATE_BASELINE", default_value = DEFAULT_BASELINE)]
    pub baseline: PathBuf,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
    pub format: ReportFormat,

    /// Threshold policy file (JSON or YAML)
    #[arg(long, env = "PERFGATE_THRESHOLDS")]
    pub thresholds: Option<PathBuf>,

    /// Exit non-zero on warning (2) or regression (1)
    #[arg(long)]
    pub fail_on_regression: bool,
}

impl CheckArgs {
    pub fn baseline_path(&self) -> &Path {
        self.baseline_positional.as_deref().unwrap_or(self.baseline.as_path())
    }
}
