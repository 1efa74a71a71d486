#![no_main]

use libfuzzer_sys::fuzz_target;
use zugferd_extractor::classify::is_likely_invoice_xml;
use zugferd_extractor::strategy::ByteScanStrategy;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a container: must not panic, and every slice found
    // must pass the sniff.
    let found = ByteScanStrategy::new().scan(data);
    for (_, xml) in found.iter() {
        assert!(is_likely_invoice_xml(xml));
    }
});
