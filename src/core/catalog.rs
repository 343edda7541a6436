use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The set of reference sequences declared by a stream's header block.
///
/// Built once per input stream from its `@SQ` lines and immutable afterwards;
/// this is the authoritative set of valid reference names for that stream.
/// Declared lengths are advisory (counting never uses them) and may be
/// absent when the header omits the `LN:` sub-field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    sequences: HashMap<String, Option<u64>>,
}

impl ReferenceCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, length: Option<u64>) {
        self.sequences.insert(name.into(), length);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    /// Declared length of a reference, if the header carried one.
    #[must_use]
    pub fn length(&self, name: &str) -> Option<u64> {
        self.sequences.get(name).copied().flatten()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(String::as_str)
    }

    /// Reference names sorted lexicographically, for deterministic output.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let mut catalog = ReferenceCatalog::new();
        catalog.insert("chr1", Some(1000));
        catalog.insert("chr2", None);

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("chr1"));
        assert!(!catalog.contains("chr3"));
        assert_eq!(catalog.length("chr1"), Some(1000));
        assert_eq!(catalog.length("chr2"), None);
        assert_eq!(catalog.length("chr3"), None);
    }

    #[test]
    fn test_empty_catalog_is_legal() {
        let catalog = ReferenceCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.sorted_names().is_empty());
    }

    #[test]
    fn test_sorted_names() {
        let mut catalog = ReferenceCatalog::new();
        catalog.insert("chr2", None);
        catalog.insert("chr10", None);
        catalog.insert("chr1", None);

        assert_eq!(catalog.sorted_names(), vec!["chr1", "chr10", "chr2"]);
    }
}
