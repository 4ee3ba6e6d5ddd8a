//! Metric name → (class, direction) resolution.
//!
//! Built-in names cover what the benchmark harness emits. A policy file can
//! add new names or redefine built-ins; metrics that resolve to nothing are
//! not comparable because their direction is unknown.

use crate::model::{MetricClass, MetricDirection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricDef {
    pub class: MetricClass,
    pub direction: MetricDirection,
}

impl MetricDef {
    pub const fn new(class: MetricClass, direction: MetricDirection) -> Self {
        Self { class, direction }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricCatalog {
    custom: BTreeMap<String, MetricDef>,
}

impl MetricCatalog {
    /// Catalog with only the built-in definitions.
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn with_definitions(mut self, defs: &BTreeMap<String, MetricDef>) -> Self {
        for (name, def) in defs {
            self.custom.insert(name.clone(), *def);
        }
        self
    }

    pub fn resolve(&self, metric: &str) -> Option<MetricDef> {
        self.custom
            .get(metric)
            .copied()
            .or_else(|| builtin_definition(metric))
    }
}

fn builtin_definition(metric: &str) -> Option<MetricDef> {
    use MetricClass::*;
    use MetricDirection::*;

    match metric {
        "rps" | "transfer_rate" => Some(MetricDef::new(Rps, HigherIsBetter)),
        "cpu_usage" | "memory_usage" => Some(MetricDef::new(Resources, LowerIsBetter)),
        m if m == "latency" || m.starts_with("latency_") => {
            Some(MetricDef::new(Latency, LowerIsBetter))
        }
        _ => None,
    }
}
