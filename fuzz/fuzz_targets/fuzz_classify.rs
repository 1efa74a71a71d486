#![no_main]

use libfuzzer_sys::fuzz_target;
use zugferd_extractor::classify::{
    InvoiceFlavor, guideline_id, is_likely_invoice_xml, is_structurally_valid,
};

fuzz_target!(|data: &[u8]| {
    let _ = is_likely_invoice_xml(data);
    let _ = is_structurally_valid(data);
    let _ = InvoiceFlavor::sniff(data);
    let _ = guideline_id(data);
});
