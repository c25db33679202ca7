//! Running candidate set for conjunctive execution
//!
//! The set starts unconstrained, is seeded by the first scan, and from then
//! on is only ever narrowed by intersection. IDs are kept sorted ascending.

use crate::index::DocId;

/// Inclusive doc-ID bounds of a candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocIdBounds {
    pub min: DocId,
    pub max: DocId,
}

impl DocIdBounds {
    pub fn contains(&self, id: &str) -> bool {
        self.min.as_str() <= id && id <= self.max.as_str()
    }
}

/// IDs known to satisfy every field group applied so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    // None until the first group has been applied
    ids: Option<Vec<DocId>>,
}

impl CandidateSet {
    /// A set with no constraint applied yet
    pub fn unconstrained() -> Self {
        Self { ids: None }
    }

    pub fn is_constrained(&self) -> bool {
        self.ids.is_some()
    }

    /// True once a constraint has been applied and nothing survived it
    pub fn is_empty(&self) -> bool {
        self.ids.as_ref().is_some_and(|ids| ids.is_empty())
    }

    /// Number of candidates; None while unconstrained
    pub fn len(&self) -> Option<usize> {
        self.ids.as_ref().map(Vec::len)
    }

    /// Applies one scan result.
    ///
    /// `scanned` must be sorted ascending without duplicates. The first
    /// application adopts it; later ones keep only IDs present in both.
    pub fn apply(&mut self, scanned: Vec<DocId>) {
        match self.ids.as_mut() {
            None => self.ids = Some(scanned),
            Some(current) => intersect_sorted(current, &scanned),
        }
    }

    /// Smallest and largest candidate, for scan narrowing
    pub fn bounds(&self) -> Option<DocIdBounds> {
        let ids = self.ids.as_ref()?;
        match (ids.first(), ids.last()) {
            (Some(min), Some(max)) => Some(DocIdBounds {
                min: min.clone(),
                max: max.clone(),
            }),
            _ => None,
        }
    }

    /// Consumes the set. An unconstrained set yields no IDs.
    pub fn into_ids(self) -> Vec<DocId> {
        self.ids.unwrap_or_default()
    }
}

/// Retains in `current` only the IDs also present in `other`.
/// Both inputs are sorted ascending.
fn intersect_sorted(current: &mut Vec<DocId>, other: &[DocId]) {
    let mut cursor = 0;
    current.retain(|id| {
        while cursor < other.len() && other[cursor] < *id {
            cursor += 1;
        }
        cursor < other.len() && other[cursor] == *id
    });
}

/// Sorts and deduplicates a scan result that arrived out of order.
///
/// Returns true if the input needed fixing.
pub(crate) fn normalize_scan(ids: &mut Vec<DocId>) -> bool {
    if ids.windows(2).all(|w| w[0] < w[1]) {
        return false;
    }
    ids.sort_unstable();
    ids.dedup();
    true
}
