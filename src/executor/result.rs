//! Result types for query execution

use crate::index::DocId;

/// Execution statistics, produced alongside every result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Number of index scans issued
    pub scans_executed: usize,
    /// Whether execution stopped early because no document could match
    pub short_circuited: bool,
    /// Candidate-set size after each executed scan, in execution order
    pub candidate_trace: Vec<usize>,
}

impl QueryStats {
    /// Stats for a plan answered without touching the index
    pub fn trivially_empty() -> Self {
        Self {
            scans_executed: 0,
            short_circuited: true,
            candidate_trace: Vec::new(),
        }
    }

    /// Returns true if the candidate set never grew between scans
    pub fn is_monotonic(&self) -> bool {
        self.candidate_trace.windows(2).all(|w| w[1] <= w[0])
    }
}

/// Result of executing one plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutput {
    /// Matching document IDs, ascending
    pub ids: Vec<DocId>,
    /// Execution statistics
    pub stats: QueryStats,
}

impl QueryOutput {
    /// Returns the number of matching documents
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if nothing matched
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns true if `id` matched
    pub fn contains(&self, id: &str) -> bool {
        self.ids.binary_search_by(|probe| probe.as_str().cmp(id)).is_ok()
    }
}
