//! Error types for the comparison engine.
//!
//! Only structural and configuration problems surface here. Data gaps
//! (zero baselines, metrics missing on either side) are absorbed by the
//! aggregator and never become errors.

use std::path::{Path, PathBuf};

/// Result type for engine operations.
pub type PerfgateResult<T> = Result<T, PerfgateError>;

/// Exit code used by the CLI for any fatal input or configuration error.
pub const INPUT_ERROR_EXIT_CODE: i32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum PerfgateError {
    /// Baseline file exists but its structure is invalid.
    #[error("invalid baseline {}: {message}", .path.display())]
    BaselineLoad { path: PathBuf, message: String },

    /// Threshold configuration failed validation.
    #[error("invalid threshold policy: {message}")]
    InvalidPolicy { message: String },

    /// Current results are unreadable or malformed.
    #[error("cannot parse current results {}: {message}", .path.display())]
    CurrentResultsParse { path: PathBuf, message: String },

    /// Writing a report, baseline or history file failed.
    #[error("I/O error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

impl PerfgateError {
    pub fn baseline_load(path: &Path, message: impl Into<String>) -> Self {
        Self::BaselineLoad {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
        }
    }

    pub fn results_parse(path: &Path, message: impl Into<String>) -> Self {
        Self::CurrentResultsParse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn io(path: &Path, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Stable machine-readable reason code.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::BaselineLoad { .. } => "E_BASELINE_INVALID",
            Self::InvalidPolicy { .. } => "E_POLICY_INVALID",
            Self::CurrentResultsParse { .. } => "E_RESULTS_INVALID",
            Self::Io { .. } => "E_IO",
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        INPUT_ERROR_EXIT_CODE
    }
}
