//! Index error types
//!
//! Error codes:
//! - KEYSCAN_INVALID_DOCUMENT (REJECT)

use std::fmt;

/// Severity levels for index errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Write refused, index unchanged
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Index-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// Document ID or body cannot be indexed
    KeyscanInvalidDocument,
}

impl IndexErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::KeyscanInvalidDocument => "KEYSCAN_INVALID_DOCUMENT",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Index error type with full context
#[derive(Debug, Clone)]
pub struct IndexError {
    code: IndexErrorCode,
    message: String,
    /// Document the write was for
    doc_id: String,
}

impl IndexError {
    /// Create an invalid document error
    pub fn invalid_document(doc_id: impl Into<String>, reason: impl Into<String>) -> Self {
        let doc_id = doc_id.into();
        Self {
            code: IndexErrorCode::KeyscanInvalidDocument,
            message: format!("Cannot index document {:?}: {}", doc_id, reason.into()),
            doc_id,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> IndexErrorCode {
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

    /// Returns the rejected document ID
    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for IndexError {}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            IndexErrorCode::KeyscanInvalidDocument.code(),
            "KEYSCAN_INVALID_DOCUMENT"
        );
    }

    #[test]
    fn test_error_display() {
        let err = IndexError::invalid_document("doc9", "document body must be an object");
        let display = format!("{}", err);
        assert!(display.contains("KEYSCAN_INVALID_DOCUMENT"));
        assert!(display.contains("REJECT"));
        assert!(display.contains("\"doc9\""));
        assert_eq!(err.doc_id(), "doc9");
    }
}
