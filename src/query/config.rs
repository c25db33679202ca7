//! Query engine configuration
//!
//! Loaded from JSON; every field is optional.

use serde::{Deserialize, Serialize};

use crate::executor::ExecutorConfig;
use crate::observability::{Logger, Severity};
use crate::planner::PlannerConfig;

use super::errors::{QueryError, QueryResult};

/// Query engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Planner settings (default: reject empty queries)
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Executor settings (default: no doc-ID narrowing)
    #[serde(default)]
    pub executor: ExecutorConfig,

    /// Minimum log severity (default: INFO)
    ///
    /// The logger threshold is process-wide. Building a `QueryEngine` does
    /// not touch it; call `apply_log_level` once at startup.
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            planner: PlannerConfig::default(),
            executor: ExecutorConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> QueryResult<Self> {
        serde_json::from_str(text).map_err(QueryError::Config)
    }

    /// Sets the process-wide log threshold to `log_level`
    ///
    /// Affects every engine in the process, not only ones built from this
    /// config.
    pub fn apply_log_level(&self) {
        Logger::set_min_severity(self.log_level);
    }

    /// Same config with a different log level
    pub fn with_log_level(mut self, log_level: Severity) -> Self {
        self.log_level = log_level;
        self
    }
}
