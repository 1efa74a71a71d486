//! Content sniffing for embedded invoice XML.
//!
//! Two independent predicates:
//!
//! | Predicate | Semantics | Used for |
//! |-----------|-----------|----------|
//! | [`is_likely_invoice_xml`] | any indicator, case-insensitive | attachment selection |
//! | [`is_structurally_valid`] | declaration + root + namespace | advisory, logged at debug level |
//!
//! Neither validates against the XML Schema or Schematron rules.

mod flavor;
mod guideline;

use memchr::memmem;

pub use flavor::InvoiceFlavor;
pub use guideline::guideline_id;

/// Lower-case markers of CII / ZUGFeRD / Factur-X / XRechnung content.
pub const INDICATORS: [&str; 8] = [
    "crossindustrydocument",
    "crossindustryinvoice",
    "urn:ferd:",
    "urn:cen.eu:en16931",
    "zugferd",
    "factur-x",
    "xrechnung",
    "rsm:crossindustrydocument",
];

/// ZUGFeRD 1.0 CII namespace.
pub const FERD_NAMESPACE: &str = "urn:ferd:";

/// EN 16931 customization namespace used by ZUGFeRD 2.x / Factur-X.
pub const EN16931_NAMESPACE: &str = "urn:cen.eu:en16931";

/// Loose sniff: does the blob contain any invoice indicator?
///
/// Returns `false` for empty input. A single match is enough.
pub fn is_likely_invoice_xml(data: &[u8]) -> bool {
    if data.is_empty() {
        return false;
    }
    let lower = data.to_ascii_lowercase();
    INDICATORS
        .iter()
        .any(|indicator| contains(&lower, indicator.as_bytes()))
}

/// Indicators present in the blob, in [`INDICATORS`] order.
pub fn matched_indicators(data: &[u8]) -> Vec<&'static str> {
    if data.is_empty() {
        return Vec::new();
    }
    let lower = data.to_ascii_lowercase();
    INDICATORS
        .iter()
        .copied()
        .filter(|indicator| contains(&lower, indicator.as_bytes()))
        .collect()
}

/// Strict advisory check: XML declaration, a CII root element and a
/// namespace declaration pointing at one of the known namespaces.
///
/// Case-sensitive. Never used to select an attachment.
pub fn is_structurally_valid(data: &[u8]) -> bool {
    let has_decl = contains(data, b"<?xml");
    let has_root =
        contains(data, b"CrossIndustryDocument") || contains(data, b"CrossIndustryInvoice");
    let has_namespace = contains(data, b"xmlns:")
        && (contains(data, FERD_NAMESPACE.as_bytes())
            || contains(data, EN16931_NAMESPACE.as_bytes()));

    has_decl && has_root && has_namespace
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    memmem::find(haystack, needle)
}

pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle).is_some()
}
