/// Canonical embedded-invoice filenames, highest priority first.
pub const CANONICAL_FILENAMES: [&str; 5] = [
    "ZUGFeRD-invoice.xml", // ZUGFeRD 1.0
    "zugferd-invoice.xml", // ZUGFeRD 2.0/2.1
    "factur-x.xml",        // Factur-X
    "xrechnung.xml",       // XRechnung
    "cii.xml",             // Cross Industry Invoice
];

/// Ordered list of well-known attachment names used as a discovery tie-break
/// and to decide whether an attachment name is reused for the output file.
///
/// Immutable once built; share it by reference or copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilenamePriority {
    names: &'static [&'static str],
}

impl FilenamePriority {
    /// Build a priority list from names ordered highest priority first.
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    /// Names in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    /// Exact (case-sensitive) membership test.
    pub fn is_canonical(&self, name: &str) -> bool {
        self.names.contains(&name)
    }

    /// Position in the priority order, 0 being the highest.
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }
}

impl Default for FilenamePriority {
    fn default() -> Self {
        Self::new(&CANONICAL_FILENAMES)
    }
}
