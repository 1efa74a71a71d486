use std::fs;
use std::path::Path;

use memchr::memmem::Finder;
use tracing::debug;

use super::ExtractionStrategy;
use crate::classify::{InvoiceFlavor, is_likely_invoice_xml};
use crate::core::{AttachmentSet, ExtractorError, Result};

/// Markers where an embedded invoice XML may begin.
pub const START_MARKERS: [&str; 3] = [
    "<?xml version=\"1.0\"",
    "<rsm:CrossIndustryDocument",
    "<rsm:CrossIndustryInvoice",
];

/// Closing tags that may end an embedded invoice XML.
pub const END_MARKERS: [&str; 4] = [
    "</rsm:CrossIndustryDocument>",
    "</rsm:CrossIndustryInvoice>",
    "</CrossIndustryDocument>",
    "</CrossIndustryInvoice>",
];

/// Last-resort extraction that never parses the container: it looks for
/// CII XML stored as plain bytes (uncompressed embedded streams).
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteScanStrategy;

impl ByteScanStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Scan an in-memory container. Each start marker contributes at most one
    /// slice (its first occurrence); slices failing the sniff predicate are
    /// dropped. Names are synthesized from content, and when two slices map
    /// to the same name the later marker replaces the earlier slice.
    pub fn scan(&self, data: &[u8]) -> AttachmentSet {
        let mut attachments = AttachmentSet::new();

        for marker in START_MARKERS {
            let Some(start) = Finder::new(marker).find(data) else {
                continue;
            };
            let Some(xml) = slice_xml_at(data, start) else {
                continue;
            };
            if !is_likely_invoice_xml(xml) {
                continue;
            }

            let name = InvoiceFlavor::sniff(xml).canonical_filename();
            let replaced = attachments.insert(name, xml.to_vec()).is_some();
            debug!(offset = start, attachment = name, bytes = xml.len(), replaced, "extracted XML from raw bytes");
        }

        attachments
    }
}

impl ExtractionStrategy for ByteScanStrategy {
    fn name(&self) -> &str {
        "byte-scan"
    }

    fn attempt_extract(&self, container: &Path) -> Result<AttachmentSet> {
        let data = fs::read(container)?;
        let attachments = self.scan(&data);
        if attachments.is_empty() {
            return Err(ExtractorError::Container(
                "byte scan found no invoice XML".to_string(),
            ));
        }
        Ok(attachments)
    }
}

/// Slice from `start` through the end of the earliest closing tag found
/// after it, across all [`END_MARKERS`].
///
/// The closing tag is not matched to the opening tag's family, so the slice
/// is not guaranteed to be well-formed XML. A closing tag must be followed
/// by at least one byte; one that ends exactly at the end of `data` is not
/// accepted. Returns `None` when `start` is out of range or no closing tag
/// qualifies.
pub fn slice_xml_at(data: &[u8], start: usize) -> Option<&[u8]> {
    let rest = data.get(start..)?;
    let end = END_MARKERS
        .iter()
        .filter_map(|marker| Finder::new(marker).find(rest).map(|idx| idx + marker.len()))
        .filter(|&end| end < rest.len())
        .min()?;
    Some(&rest[..end])
}
