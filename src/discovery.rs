//! Selection of the invoice XML among a container's attachments.

use tracing::debug;

use crate::classify::{is_likely_invoice_xml, matched_indicators};
use crate::core::{AttachmentSet, CandidateXml, ExtractorError, FilenamePriority, Result};

/// Pick the invoice XML out of `attachments`.
///
/// 1. Canonical names in priority order; the first whose content passes the
///    sniff predicate wins, even if a later one would also match.
/// 2. Any other `*.xml` attachment (case-insensitive suffix) in set order.
/// 3. Otherwise [`ExtractorError::NoInvoiceCandidate`] listing every name.
///
/// A canonical name with non-invoice content is skipped, never fatal.
pub fn discover(mut attachments: AttachmentSet, priority: &FilenamePriority) -> Result<CandidateXml> {
    for known in priority.iter() {
        let Some(data) = attachments.get(known) else {
            continue;
        };
        if is_likely_invoice_xml(data) {
            debug!(name = known, indicators = ?matched_indicators(data), "found canonical invoice XML");
            return Ok(take(&mut attachments, known));
        }
        debug!(name = known, "canonical name present but content is not invoice XML");
    }

    let fallback = attachments
        .iter()
        .filter(|(name, _)| !priority.is_canonical(name))
        .find(|(name, data)| has_xml_suffix(name) && is_likely_invoice_xml(data))
        .map(|(name, _)| name.to_string());
    if let Some(name) = fallback {
        debug!(name = %name, "found invoice XML under non-standard name");
        return Ok(take(&mut attachments, &name));
    }

    Err(ExtractorError::NoInvoiceCandidate {
        available: attachments.names().map(String::from).collect(),
    })
}

fn take(attachments: &mut AttachmentSet, name: &str) -> CandidateXml {
    CandidateXml {
        name: name.to_string(),
        data: attachments.take(name).unwrap_or_default(),
    }
}

fn has_xml_suffix(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".xml")
}
