//! Conjunctive query executor
//!
//! Executes plans against a scan source, producing deterministic results.
//!
//! Execution flow (strict order):
//! 1. Trivially empty plans return at once, with zero scans
//! 2. Check cancellation before each scan
//! 3. Scan the next field group's range
//! 4. Intersect the scan into the candidate set
//! 5. Stop as soon as the candidate set is empty
//! 6. Return the surviving candidates with stats

use serde::{Deserialize, Serialize};

use crate::index::DocId;
use crate::observability::{log_event, Event};
use crate::planner::{ExecutionPlan, FieldGroup, KeyRange, PlanKind};

use super::cancel::CancelToken;
use super::candidate::{normalize_scan, CandidateSet, DocIdBounds};
use super::errors::{ExecutorError, ExecutorResult, ScanResult};
use super::result::{QueryOutput, QueryStats};

/// The index range-scan primitive the executor drives.
pub trait ScanSource {
    /// All documents with a `field` entry whose key falls in `range`.
    ///
    /// IDs must be ascending with no duplicates.
    fn scan(&self, field: &str, range: &KeyRange) -> ScanResult<Vec<DocId>>;

    /// Every indexed document, ascending
    fn scan_all(&self) -> ScanResult<Vec<DocId>>;

    /// Like `scan`, restricted to IDs within `bounds`.
    ///
    /// Sources that store entries as (key, docID) can seek directly; the
    /// default filters a full range scan.
    fn scan_within(
        &self,
        field: &str,
        range: &KeyRange,
        bounds: &DocIdBounds,
    ) -> ScanResult<Vec<DocId>> {
        let mut ids = self.scan(field, range)?;
        ids.retain(|id| bounds.contains(id));
        Ok(ids)
    }
}

/// Executor configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Restrict scans after the first to the current candidates' min/max
    /// doc IDs (default: false)
    #[serde(default)]
    pub narrow_by_candidate_bounds: bool,
}

impl ExecutorConfig {
    /// Config with doc-ID narrowing enabled
    pub fn narrowing() -> Self {
        Self {
            narrow_by_candidate_bounds: true,
        }
    }
}

/// Executor for one query. Owns its candidate set; shares nothing.
pub struct AndExecutor<'a, S: ScanSource + ?Sized> {
    source: &'a S,
    config: ExecutorConfig,
    cancel: Option<CancelToken>,
}

impl<'a, S: ScanSource + ?Sized> AndExecutor<'a, S> {
    /// Creates a new executor
    pub fn new(source: &'a S, config: ExecutorConfig) -> Self {
        Self {
            source,
            config,
            cancel: None,
        }
    }

    /// Attaches a cancellation token, polled before every scan
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Executes a plan and returns matching IDs with stats.
    ///
    /// This method is deterministic: same plan + same index = same output.
    pub fn execute(&self, plan: &ExecutionPlan) -> ExecutorResult<QueryOutput> {
        match plan.kind() {
            PlanKind::TriviallyEmpty { field } => {
                log_event(Event::QueryContradiction, &[("field", field.as_str())]);
                Ok(QueryOutput {
                    ids: Vec::new(),
                    stats: QueryStats::trivially_empty(),
                })
            }
            PlanKind::MatchAll => self.execute_match_all(),
            PlanKind::Scan => self.execute_groups(plan.groups()),
        }
    }

    fn execute_match_all(&self) -> ExecutorResult<QueryOutput> {
        self.check_cancelled(0)?;

        let mut ids = self
            .source
            .scan_all()
            .map_err(ExecutorError::scan_all_failed)?;
        self.normalize("*", &mut ids);

        let stats = QueryStats {
            scans_executed: 1,
            short_circuited: ids.is_empty(),
            candidate_trace: vec![ids.len()],
        };
        Ok(QueryOutput { ids, stats })
    }

    fn execute_groups(&self, groups: &[FieldGroup]) -> ExecutorResult<QueryOutput> {
        let mut candidates = CandidateSet::unconstrained();
        let mut stats = QueryStats::default();

        for (i, group) in groups.iter().enumerate() {
            self.check_cancelled(stats.scans_executed)?;

            let span = match group.scan_range() {
                Some(span) => span,
                None => {
                    // Planner flags these plans as trivially empty
                    stats.short_circuited = true;
                    return Ok(QueryOutput {
                        ids: Vec::new(),
                        stats,
                    });
                }
            };

            let scanned = self
                .scan_group(group.field(), span, &candidates)
                .map_err(|e| {
                    log_event(
                        Event::QueryScanFailed,
                        &[("field", group.field()), ("reason", e.to_string().as_str())],
                    );
                    ExecutorError::scan_failed(group.field(), stats.scans_executed, e)
                })?;
            stats.scans_executed += 1;

            let returned = scanned.len();
            candidates.apply(scanned);
            let remaining = candidates.len().unwrap_or(0);
            stats.candidate_trace.push(remaining);

            log_event(
                Event::QueryScan,
                &[
                    ("candidates", remaining.to_string().as_str()),
                    ("field", group.field()),
                    ("range", span.to_string().as_str()),
                    ("returned", returned.to_string().as_str()),
                ],
            );

            if candidates.is_empty() {
                stats.short_circuited = true;
                let skipped = groups.len() - i - 1;
                log_event(
                    Event::QueryShortCircuit,
                    &[("field", group.field()), ("skipped", skipped.to_string().as_str())],
                );
                return Ok(QueryOutput {
                    ids: Vec::new(),
                    stats,
                });
            }
        }

        Ok(QueryOutput {
            ids: candidates.into_ids(),
            stats,
        })
    }

    fn scan_group(
        &self,
        field: &str,
        span: &KeyRange,
        candidates: &CandidateSet,
    ) -> ScanResult<Vec<DocId>> {
        let bounds = if self.config.narrow_by_candidate_bounds {
            candidates.bounds()
        } else {
            None
        };

        let mut ids = match bounds {
            Some(bounds) => self.source.scan_within(field, span, &bounds)?,
            None => self.source.scan(field, span)?,
        };
        self.normalize(field, &mut ids);
        Ok(ids)
    }

    fn normalize(&self, field: &str, ids: &mut Vec<DocId>) {
        if normalize_scan(ids) {
            log_event(Event::ScanResultUnordered, &[("field", field)]);
        }
    }

    fn check_cancelled(&self, scans_executed: usize) -> ExecutorResult<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(ExecutorError::cancelled(scans_executed)),
            _ => Ok(()),
        }
    }
}
