//! Engine-level error type
//!
//! Wraps planner and executor errors, keeping their codes reachable.

use thiserror::Error;

use crate::executor::ExecutorError;
use crate::planner::PlannerError;

/// Any failure of a query engine call
#[derive(Debug, Error)]
pub enum QueryError {
    /// Planning refused the query
    #[error(transparent)]
    Planner(#[from] PlannerError),

    /// Execution aborted
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    /// Configuration could not be parsed
    #[error("invalid engine configuration: {0}")]
    Config(#[source] serde_json::Error),
}

impl QueryError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::Planner(e) => e.code().code(),
            QueryError::Executor(e) => e.code().code(),
            QueryError::Config(_) => "KEYSCAN_INVALID_CONFIG",
        }
    }

    /// True if the planner rejected the query
    pub fn is_rejection(&self) -> bool {
        matches!(self, QueryError::Planner(_))
    }

    /// True if the query was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, QueryError::Executor(e) if e.is_cancelled())
    }
}

/// Result type for engine operations
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ScanError;

    #[test]
    fn test_codes_pass_through() {
        let err: QueryError = PlannerError::empty_query().into();
        assert_eq!(err.code(), "KEYSCAN_EMPTY_QUERY");
        assert!(err.is_rejection());
        assert!(!err.is_cancelled());

        let err: QueryError = ExecutorError::cancelled(2).into();
        assert_eq!(err.code(), "KEYSCAN_QUERY_CANCELLED");
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_display_is_transparent() {
        let inner = ExecutorError::scan_failed("foo", 1, ScanError::Unavailable("down".into()));
        let expected = inner.to_string();
        let err = QueryError::from(inner);
        assert_eq!(err.to_string(), expected);
    }
}
