//! Query metrics for keyscan
//!
//! - Counters only
//! - Monotonic increase
//! - Passive: nothing reads them during execution

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters of a query engine
///
/// All counters use atomic operations with Relaxed ordering.
#[derive(Debug, Default)]
pub struct QueryMetrics {
    /// Queries that returned a result (empty or not)
    queries_executed: AtomicU64,
    /// Queries the planner refused
    queries_rejected: AtomicU64,
    /// Queries stopped by cancellation
    queries_cancelled: AtomicU64,
    /// Queries aborted by a scan failure
    queries_failed: AtomicU64,
    /// Queries that skipped groups after the candidate set emptied
    queries_short_circuited: AtomicU64,
    /// Queries answered with zero scans because of a contradiction
    queries_trivially_empty: AtomicU64,
    /// Total index scans issued
    scans_executed: AtomicU64,
}

impl QueryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_cancelled(&self) {
        self.queries_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_short_circuited(&self) {
        self.queries_short_circuited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_trivially_empty(&self) {
        self.queries_trivially_empty.fetch_add(1, Ordering::Relaxed);
    }

    /// Add scans issued by one query
    pub fn add_scans(&self, scans: u64) {
        self.scans_executed.fetch_add(scans, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            queries_cancelled: self.queries_cancelled.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            queries_short_circuited: self.queries_short_circuited.load(Ordering::Relaxed),
            queries_trivially_empty: self.queries_trivially_empty.load(Ordering::Relaxed),
            scans_executed: self.scans_executed.load(Ordering::Relaxed),
        }
    }

    /// Current counters as one JSON object
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_default()
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub queries_cancelled: u64,
    pub queries_failed: u64,
    pub queries_short_circuited: u64,
    pub queries_trivially_empty: u64,
    pub scans_executed: u64,
}
