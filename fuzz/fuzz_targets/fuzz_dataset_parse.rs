#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parse → serialize → parse must not panic at any step.
        if let Ok(dataset) = eu_vat_rates::Dataset::from_json(s) {
            if let Ok(json) = dataset.to_json_pretty() {
                let _ = eu_vat_rates::Dataset::from_json(&json);
            }
        }
    }
});
