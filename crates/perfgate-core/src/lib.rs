//! Baseline comparison engine for service benchmarks.
//!
//! Given the metrics of a current run and a stored baseline, classify every
//! (scenario, metric) pair as a regression, warning, improvement or neutral
//! change and roll the results up into a single verdict.

pub mod aggregate;
pub mod baseline;
pub mod catalog;
mod codec;
pub mod compare;
pub mod config;
pub mod errors;
pub mod model;
pub mod policy;
pub mod report;
pub mod results;
pub mod update;

pub use aggregate::{aggregate, Report, Summary};
pub use baseline::{BaselineSnapshot, BaselineStore};
pub use catalog::{MetricCatalog, MetricDef};
pub use config::GateConfig;
pub use errors::{PerfgateError, PerfgateResult};
pub use model::{ComparisonResult, MetricClass, MetricDirection, OverallStatus, Severity};
pub use policy::{ThresholdPolicy, ThresholdSet};
pub use results::CurrentResults;
