#![no_main]

use libfuzzer_sys::fuzz_target;
use perfgate_core::BaselineStore;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    for path in ["baseline.json", "baseline.yaml"] {
        if let Ok(store) = BaselineStore::from_bytes(Path::new(path), data) {
            let _ = store.threshold_overrides();
        }
    }
});
