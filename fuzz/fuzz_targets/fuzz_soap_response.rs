#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine; a panic is a bug.
        let _ = eu_vat_rates::tedb::parse_soap_response(s);
    }
});
