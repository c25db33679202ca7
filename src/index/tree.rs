//! BTreeMap-based field index
//!
//! One `FieldIndex` holds every (key, docID) entry of a single field,
//! ordered by key, then docID. Doc IDs per key are kept in a `BTreeSet`, so
//! lookups return them sorted and a scan can seek into a doc-ID range.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use super::key::IndexKey;

/// Document identifier
pub type DocId = String;

/// The sorted entries of a single field.
#[derive(Debug, Default)]
pub struct FieldIndex {
    /// Maps key values to sorted doc IDs
    tree: BTreeMap<IndexKey, BTreeSet<DocId>>,
}

impl FieldIndex {
    /// Creates a new empty field index
    pub fn new() -> Self {
        Self {
            tree: BTreeMap::new(),
        }
    }

    /// Insert a doc ID for a key. Inserting twice is a no-op.
    pub fn insert(&mut self, key: IndexKey, id: DocId) {
        self.tree.entry(key).or_default().insert(id);
    }

    /// Remove a doc ID for a key.
    ///
    /// If the key has no more doc IDs, removes the key entirely.
    pub fn remove(&mut self, key: &IndexKey, id: &str) {
        if let Some(ids) = self.tree.get_mut(key) {
            ids.remove(id);
            if ids.is_empty() {
                self.tree.remove(key);
            }
        }
    }

    /// Lookup all doc IDs for an exact key match, sorted ascending.
    pub fn lookup_eq(&self, key: &IndexKey) -> Vec<DocId> {
        self.tree
            .get(key)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Lookup doc IDs whose key lies within the given bounds.
    ///
    /// Returns IDs sorted ascending without duplicates, even when one
    /// document has several keys in the range.
    pub fn lookup_range(&self, start: Bound<&IndexKey>, end: Bound<&IndexKey>) -> Vec<DocId> {
        self.collect_range(start, end, None)
    }

    /// Like `lookup_range`, but only IDs in `[min_id, max_id]`.
    pub fn lookup_range_within(
        &self,
        start: Bound<&IndexKey>,
        end: Bound<&IndexKey>,
        min_id: &str,
        max_id: &str,
    ) -> Vec<DocId> {
        self.collect_range(start, end, Some((min_id, max_id)))
    }

    fn collect_range(
        &self,
        start: Bound<&IndexKey>,
        end: Bound<&IndexKey>,
        ids_within: Option<(&str, &str)>,
    ) -> Vec<DocId> {
        let mut result = BTreeSet::new();
        if matches!(ids_within, Some((min, max)) if min > max) {
            return Vec::new();
        }
        for (_, ids) in self.tree.range::<IndexKey, _>((start, end)) {
            match ids_within {
                Some((min, max)) => {
                    let bounds = (Bound::Included(min), Bound::Included(max));
                    result.extend(ids.range::<str, _>(bounds).cloned());
                }
                None => result.extend(ids.iter().cloned()),
            }
        }
        result.into_iter().collect()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the number of distinct keys
    pub fn key_count(&self) -> usize {
        self.tree.len()
    }

    /// Returns the total number of (key, docID) entries
    pub fn entry_count(&self) -> usize {
        self.tree.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64) -> IndexKey {
        IndexKey::from_int(v)
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut tree = FieldIndex::new();

        tree.insert(IndexKey::from_string("alice"), "doc2".into());
        tree.insert(IndexKey::from_string("alice"), "doc1".into());
        tree.insert(IndexKey::from_string("bob"), "doc3".into());

        assert_eq!(
            tree.lookup_eq(&IndexKey::from_string("alice")),
            vec!["doc1", "doc2"]
        );
        assert_eq!(tree.lookup_eq(&IndexKey::from_string("bob")), vec!["doc3"]);
        assert!(tree.lookup_eq(&IndexKey::from_string("carol")).is_empty());
    }

    #[test]
    fn test_duplicate_insert_ignored() {
        let mut tree = FieldIndex::new();
        tree.insert(n(42), "a".into());
        tree.insert(n(42), "a".into());
        assert_eq!(tree.entry_count(), 1);
    }

    #[test]
    fn test_remove() {
        let mut tree = FieldIndex::new();

        tree.insert(n(1), "a".into());
        tree.insert(n(1), "b".into());

        tree.remove(&n(1), "a");
        assert_eq!(tree.lookup_eq(&n(1)), vec!["b"]);

        // Remove last doc, key should be removed
        tree.remove(&n(1), "b");
        assert_eq!(tree.key_count(), 0);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_lookup_range() {
        let mut tree = FieldIndex::new();
        for v in 1..=5 {
            tree.insert(n(v), format!("doc{}", v));
        }

        let ids = tree.lookup_range(Bound::Included(&n(2)), Bound::Excluded(&n(4)));
        assert_eq!(ids, vec!["doc2", "doc3"]);

        let ids = tree.lookup_range(Bound::Excluded(&n(3)), Bound::Unbounded);
        assert_eq!(ids, vec!["doc4", "doc5"]);
    }

    #[test]
    fn test_lookup_range_dedups_multi_valued_docs() {
        let mut tree = FieldIndex::new();
        tree.insert(n(1), "b".into());
        tree.insert(n(2), "a".into());
        tree.insert(n(3), "b".into());

        let ids = tree.lookup_range(Bound::Unbounded, Bound::Unbounded);
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_lookup_range_within_ids() {
        let mut tree = FieldIndex::new();
        for id in ["a", "c", "e", "g"] {
            tree.insert(n(7), id.to_string());
        }

        let ids = tree.lookup_range_within(Bound::Included(&n(7)), Bound::Included(&n(7)), "b", "e");
        assert_eq!(ids, vec!["c", "e"]);
    }
}
