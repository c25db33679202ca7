//! Query engine facade
//!
//! Plans and executes conjunctive queries against one scan source, logging
//! every query under its own id and recording metrics.

use uuid::Uuid;

use crate::executor::{AndExecutor, CancelToken, ExecutorConfig, QueryOutput, ScanSource};
use crate::observability::{
    log_event, Event, MetricsSnapshot, ObservationScope, QueryMetrics, Timer,
};
use crate::planner::{ExecutionPlan, ExplainPlan, FieldGroupPlanner, Query};

use super::config::EngineConfig;
use super::errors::QueryResult;

/// Plans and runs queries against a scan source
pub struct QueryEngine<S: ScanSource> {
    source: S,
    planner: FieldGroupPlanner,
    executor_config: ExecutorConfig,
    metrics: QueryMetrics,
}

impl<S: ScanSource> QueryEngine<S> {
    /// Creates an engine from its configuration
    ///
    /// The log level is not applied here; see `EngineConfig::apply_log_level`.
    pub fn new(source: S, config: EngineConfig) -> Self {
        log_event(
            Event::ConfigLoaded,
            &[
                ("empty_query", format!("{:?}", config.planner.empty_query).as_str()),
                ("log_level", config.log_level.as_str()),
                (
                    "narrow_by_candidate_bounds",
                    config.executor.narrow_by_candidate_bounds.to_string().as_str(),
                ),
            ],
        );

        Self {
            source,
            planner: FieldGroupPlanner::new(config.planner),
            executor_config: config.executor,
            metrics: QueryMetrics::new(),
        }
    }

    /// Creates an engine with the default configuration
    pub fn with_defaults(source: S) -> Self {
        Self::new(source, EngineConfig::default())
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source, e.g. to index more documents
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Run a query to completion
    pub fn search(&self, query: &Query) -> QueryResult<QueryOutput> {
        self.run(query, None)
    }

    /// Run a query that stops once `cancel` is triggered
    pub fn search_with_cancel(&self, query: &Query, cancel: CancelToken) -> QueryResult<QueryOutput> {
        self.run(query, Some(cancel))
    }

    /// Plan a query without executing it
    pub fn explain(&self, query: &Query) -> ExplainPlan {
        let explain = match self.planner.plan_query(query) {
            Ok(plan) => ExplainPlan::from_plan(&plan),
            Err(err) => ExplainPlan::from_error(&err),
        };
        log_event(
            Event::ExplainComplete,
            &[("accepted", explain.accepted.to_string().as_str())],
        );
        explain
    }

    /// Current counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn run(&self, query: &Query, cancel: Option<CancelToken>) -> QueryResult<QueryOutput> {
        let query_id = Uuid::new_v4().to_string();
        let scope = ObservationScope::with_fields("QUERY", &[("query_id", query_id.as_str())]);
        let timer = Timer::new();

        let plan = match self.planner.plan_query(query) {
            Ok(plan) => plan,
            Err(err) => {
                self.metrics.increment_queries_rejected();
                scope.end_with(
                    Event::QueryRejected,
                    &[("code", err.code().code()), ("reason", err.message())],
                );
                return Err(err.into());
            }
        };
        log_plan(&query_id, &plan);

        let mut executor = AndExecutor::new(&self.source, self.executor_config.clone());
        if let Some(token) = cancel {
            executor = executor.with_cancel(token);
        }

        match executor.execute(&plan) {
            Ok(output) => {
                self.metrics.increment_queries_executed();
                self.metrics.add_scans(output.stats.scans_executed as u64);
                if plan.is_trivially_empty() {
                    self.metrics.increment_trivially_empty();
                } else if output.stats.short_circuited {
                    self.metrics.increment_short_circuited();
                }

                scope.complete_with_fields(&[
                    ("elapsed_us", timer.elapsed_us().as_str()),
                    ("results", output.len().to_string().as_str()),
                    ("scans", output.stats.scans_executed.to_string().as_str()),
                ]);
                Ok(output)
            }
            Err(err) => {
                self.metrics.add_scans(err.scans_executed() as u64);
                if err.is_cancelled() {
                    self.metrics.increment_queries_cancelled();
                    scope.end_with(
                        Event::QueryCancelled,
                        &[("scans", err.scans_executed().to_string().as_str())],
                    );
                } else {
                    self.metrics.increment_queries_failed();
                    scope.fail(err.message());
                }
                Err(err.into())
            }
        }
    }
}

fn log_plan(query_id: &str, plan: &ExecutionPlan) {
    log_event(
        Event::QueryPlanned,
        &[
            ("fields", plan.field_order().join(",").as_str()),
            ("groups", plan.groups().len().to_string().as_str()),
            ("plan", plan.kind().as_str()),
            ("query_id", query_id),
        ],
    );
}
