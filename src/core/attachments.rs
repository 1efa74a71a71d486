use std::collections::{BTreeMap, btree_map};

/// Embedded objects pulled out of one container, keyed by reported name.
///
/// Names come straight from the container and are not guaranteed to be
/// valid filesystem names. Iteration is sorted by name, which keeps
/// discovery deterministic for a given set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    entries: BTreeMap<String, Vec<u8>>,
}

impl AttachmentSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attachment, replacing any previous entry of the same name.
    /// Returns the replaced content.
    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) -> Option<Vec<u8>> {
        self.entries.insert(name.into(), data)
    }

    /// Content of the named attachment.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Whether an attachment of exactly this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of attachments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no attachment at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attachment names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(name, content)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
    }

    /// Remove and return the named attachment.
    pub fn take(&mut self, name: &str) -> Option<Vec<u8>> {
        self.entries.remove(name)
    }
}

impl FromIterator<(String, Vec<u8>)> for AttachmentSet {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u8>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AttachmentSet {
    type Item = (String, Vec<u8>);
    type IntoIter = btree_map::IntoIter<String, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// The XML chosen by discovery together with the attachment it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateXml {
    pub name: String,
    pub data: Vec<u8>,
}
