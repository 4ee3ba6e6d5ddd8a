//! Build the per-invocation threshold policy and metric catalog.

use crate::baseline::BaselineStore;
use crate::catalog::MetricCatalog;
use crate::errors::{PerfgateError, PerfgateResult};
use crate::policy::{PolicyFile, ThresholdPolicy};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GateConfig {
    pub policy: ThresholdPolicy,
    pub catalog: MetricCatalog,
}

impl GateConfig {
    /// Layer defaults, then the baseline's own thresholds, then the
    /// policy file. An explicitly named policy file must exist.
    pub fn from_sources(
        baseline: Option<&BaselineStore>,
        policy_file: Option<&Path>,
    ) -> PerfgateResult<Self> {
        let mut policy = ThresholdPolicy::default();
        let mut catalog = MetricCatalog::builtin();

        if let Some(store) = baseline {
            policy = policy.with_overrides(&store.threshold_overrides()?)?;
        }

        if let Some(path) = policy_file {
            if !path.exists() {
                return Err(PerfgateError::invalid_policy(format!(
                    "threshold file not found: {}",
                    path.display()
                )));
            }
            let file = PolicyFile::load(path)?;
            policy = policy.with_overrides(&file.overrides()?)?;
            catalog = catalog.with_definitions(&file.metrics);
        }

        Ok(Self { policy, catalog })
    }
}
