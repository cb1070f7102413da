#![no_main]

use dgii_formatos::encode::SalesSeparator;
use dgii_formatos::source::RecordSet;
use dgii_formatos::{formato606, formato607};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(set) = RecordSet::from_json(s) else {
        return;
    };
    // Unvalidated records must still encode or fail cleanly.
    let _ = dgii_formatos::core::validate_purchases(&set.purchases);
    let _ = dgii_formatos::core::validate_sales(&set.sales);
    let _ = formato606::to_txt(&set.purchases);
    let _ = formato607::to_txt(&set.sales, SalesSeparator::Comma);
    let _ = formato606::to_xlsx(&set.purchases);
});
