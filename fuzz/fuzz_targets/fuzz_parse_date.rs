#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        if let Ok(date) = dgii_formatos::core::parse_iso_date(s) {
            let _ = dgii_formatos::core::format_date(date);
        }
    }
});
