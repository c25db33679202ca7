//! In-memory document index
//!
//! Reference implementation of the scan collaborator. Every scalar leaf of
//! every document is stored as a (field, key, docID) entry.
//!
//! # API
//!
//! - `insert_document(id, body)` - Index (or re-index) a document
//! - `remove_document(id)` - Drop a document's entries
//! - `lookup_eq(field, key)` - Exact match lookup
//! - `ScanSource::scan(field, range)` - Range scan used by the executor

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::executor::{DocIdBounds, ScanResult, ScanSource};
use crate::planner::KeyRange;

use super::errors::{IndexError, IndexResult};
use super::key::IndexKey;
use super::paths::path_values;
use super::tree::{DocId, FieldIndex};

/// In-memory index over all fields of all documents
#[derive(Debug, Default)]
pub struct MemoryIndex {
    /// Per-field entries (field -> FieldIndex), ordered by field
    fields: BTreeMap<String, FieldIndex>,

    /// Entries written for each document (for re-index and delete)
    doc_entries: HashMap<DocId, Vec<(String, IndexKey)>>,
}

impl MemoryIndex {
    /// Creates a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document, replacing any previous version of it.
    ///
    /// The body must be a JSON object.
    pub fn insert_document(&mut self, id: impl Into<DocId>, body: &Value) -> IndexResult<()> {
        let id = id.into();
        if id.is_empty() {
            return Err(IndexError::invalid_document(id, "document ID must not be empty"));
        }
        if !body.is_object() {
            return Err(IndexError::invalid_document(id, "document body must be an object"));
        }

        self.remove_document(&id);

        let entries = path_values(body);
        for (path, key) in &entries {
            self.fields
                .entry(path.clone())
                .or_default()
                .insert(key.clone(), id.clone());
        }
        self.doc_entries.insert(id, entries);
        Ok(())
    }

    /// Remove a document from all fields.
    ///
    /// Returns true if the document was indexed.
    pub fn remove_document(&mut self, id: &str) -> bool {
        let entries = match self.doc_entries.remove(id) {
            Some(entries) => entries,
            None => return false,
        };

        for (path, key) in entries {
            if let Some(tree) = self.fields.get_mut(&path) {
                tree.remove(&key, id);
                if tree.is_empty() {
                    self.fields.remove(&path);
                }
            }
        }
        true
    }

    /// Lookup doc IDs with an exact key on a field
    pub fn lookup_eq(&self, field: &str, key: &IndexKey) -> Vec<DocId> {
        self.fields
            .get(field)
            .map(|tree| tree.lookup_eq(key))
            .unwrap_or_default()
    }

    /// Returns true if the document is indexed
    pub fn contains_document(&self, id: &str) -> bool {
        self.doc_entries.contains_key(id)
    }

    /// Number of indexed documents
    pub fn document_count(&self) -> usize {
        self.doc_entries.len()
    }

    /// Indexed field paths, sorted
    pub fn indexed_fields(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Total (field, key, docID) entries
    pub fn entry_count(&self) -> usize {
        self.fields.values().map(FieldIndex::entry_count).sum()
    }

    /// Drop every document
    pub fn clear(&mut self) {
        self.fields.clear();
        self.doc_entries.clear();
    }
}

impl ScanSource for MemoryIndex {
    fn scan(&self, field: &str, range: &KeyRange) -> ScanResult<Vec<DocId>> {
        let (start, end) = range.as_bounds();
        Ok(self
            .fields
            .get(field)
            .map(|tree| tree.lookup_range(start, end))
            .unwrap_or_default())
    }

    fn scan_all(&self) -> ScanResult<Vec<DocId>> {
        let mut ids: Vec<DocId> = self.doc_entries.keys().cloned().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn scan_within(
        &self,
        field: &str,
        range: &KeyRange,
        bounds: &DocIdBounds,
    ) -> ScanResult<Vec<DocId>> {
        let (start, end) = range.as_bounds();
        Ok(self
            .fields
            .get(field)
            .map(|tree| tree.lookup_range_within(start, end, &bounds.min, &bounds.max))
            .unwrap_or_default())
    }
}
