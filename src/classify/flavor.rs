use super::contains;

/// Namespace token that only ZUGFeRD 1.0 documents carry.
const ZUGFERD_1P0_TOKEN: &[u8] = b"urn:ferd:pdfa:crossindustrydocument:invoice:1p0";

/// Invoice format family guessed from XML content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceFlavor {
    /// German public sector CIUS.
    XRechnung,
    /// Franco-German Factur-X.
    FacturX,
    /// ZUGFeRD 1.0 (`CrossIndustryDocument`).
    Zugferd1,
    /// ZUGFeRD 2.0 and later.
    Zugferd2,
    /// No family marker found.
    Unknown,
}

impl InvoiceFlavor {
    /// Classify by lower-cased content. Checked in order XRechnung,
    /// Factur-X, ZUGFeRD; the first hit wins.
    pub fn sniff(data: &[u8]) -> Self {
        let lower = data.to_ascii_lowercase();
        if contains(&lower, b"xrechnung") {
            Self::XRechnung
        } else if contains(&lower, b"factur-x") {
            Self::FacturX
        } else if contains(&lower, b"zugferd") {
            if contains(&lower, ZUGFERD_1P0_TOKEN) {
                Self::Zugferd1
            } else {
                Self::Zugferd2
            }
        } else {
            Self::Unknown
        }
    }

    /// The attachment name this flavor is conventionally embedded under.
    pub fn canonical_filename(&self) -> &'static str {
        match self {
            Self::XRechnung => "xrechnung.xml",
            Self::FacturX => "factur-x.xml",
            Self::Zugferd1 => "ZUGFeRD-invoice.xml",
            Self::Zugferd2 => "zugferd-invoice.xml",
            Self::Unknown => "invoice.xml",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::XRechnung => "XRechnung",
            Self::FacturX => "Factur-X",
            Self::Zugferd1 => "ZUGFeRD 1.0",
            Self::Zugferd2 => "ZUGFeRD 2.x",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for InvoiceFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
