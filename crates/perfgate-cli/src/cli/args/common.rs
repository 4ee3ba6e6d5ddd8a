//! Shared argument types.

use clap::ValueEnum;

pub const DEFAULT_BASELINE: &str = "docs/performance/baseline.json";
pub const DEFAULT_HISTORY: &str = "docs/performance/baseline-history.json";

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
    /// Markdown plus JSON (JSON goes next to the markdown with a .json extension)
    Both,
    /// Plain console text
    Text,
}
