//! Planner error types
//!
//! Error codes:
//! - KEYSCAN_UNSUPPORTED_OPERATOR (REJECT)
//! - KEYSCAN_INCOMPATIBLE_RANGE_TYPES (REJECT)
//! - KEYSCAN_EMPTY_QUERY (REJECT)
//! - KEYSCAN_UNBOUNDED_RANGE (REJECT)

use std::fmt;

use crate::index::KeyKind;

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// Predicate cannot be expressed as a key range
    KeyscanUnsupportedOperator,
    /// Predicates on one field compare against values of different kinds
    KeyscanIncompatibleRangeTypes,
    /// Query has no predicates and the policy rejects it
    KeyscanEmptyQuery,
    /// A field group would scan the whole field
    KeyscanUnboundedRange,
}

impl PlannerErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::KeyscanUnsupportedOperator => "KEYSCAN_UNSUPPORTED_OPERATOR",
            PlannerErrorCode::KeyscanIncompatibleRangeTypes => "KEYSCAN_INCOMPATIBLE_RANGE_TYPES",
            PlannerErrorCode::KeyscanEmptyQuery => "KEYSCAN_EMPTY_QUERY",
            PlannerErrorCode::KeyscanUnboundedRange => "KEYSCAN_UNBOUNDED_RANGE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error type with full context
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerError {
    /// Error code
    code: PlannerErrorCode,
    /// Human-readable message
    message: String,
    /// Field name if applicable
    field: Option<String>,
}

impl PlannerError {
    /// Create an unsupported operator error
    pub fn unsupported_operator(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: PlannerErrorCode::KeyscanUnsupportedOperator,
            message: format!("Predicate on '{}' cannot use an index range: {}", f, reason.into()),
            field: Some(f),
        }
    }

    /// Create an incompatible range types error
    pub fn incompatible_range_types(field: impl Into<String>, a: KeyKind, b: KeyKind) -> Self {
        let f = field.into();
        Self {
            code: PlannerErrorCode::KeyscanIncompatibleRangeTypes,
            message: format!("Field '{}' is compared against both {} and {} values", f, a, b),
            field: Some(f),
        }
    }

    /// Create an empty query error
    pub fn empty_query() -> Self {
        Self {
            code: PlannerErrorCode::KeyscanEmptyQuery,
            message: "Query must include at least one predicate".into(),
            field: None,
        }
    }

    /// Create an unbounded range error
    pub fn unbounded_range(field: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: PlannerErrorCode::KeyscanUnboundedRange,
            message: format!("Predicates on '{}' do not constrain the key range", f),
            field: Some(f),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> PlannerErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the field name if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
