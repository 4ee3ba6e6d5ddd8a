#![no_main]

use libfuzzer_sys::fuzz_target;
use perfgate_core::{aggregate, BaselineSnapshot, BaselineStore, CurrentResults, GateConfig};
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let Ok(results) = CurrentResults::from_slice(Path::new("results.json"), data) else {
        return;
    };
    // Compare the run against itself: every comparable pair must be neutral.
    let mut snapshot = BaselineSnapshot::default();
    for scenario in &results.scenarios {
        if snapshot.baseline.contains_key(&scenario.name) {
            return;
        }
        let slot = snapshot.baseline.entry(scenario.name.clone()).or_default();
        for (name, value) in scenario.numeric() {
            slot.insert(name.to_string(), value);
        }
    }
    let store = BaselineStore::from_snapshot(snapshot);
    let config = GateConfig::default();
    let report = aggregate(&results, Some(&store), &config.policy, &config.catalog);
    assert!(report.regressions.is_empty());
    assert!(report.warnings.is_empty());
});
