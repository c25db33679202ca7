//! Executor error types
//!
//! Error codes:
//! - KEYSCAN_SCAN_FAILED (ERROR)
//! - KEYSCAN_QUERY_CANCELLED (ERROR)

use std::fmt;

use thiserror::Error;

/// Failure reported by a scan collaborator.
///
/// The executor never retries; these reach the caller unchanged.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("index store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt index entry on field '{field}': {reason}")]
    Corrupted { field: String, reason: String },

    #[error("index I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for scan collaborators
pub type ScanResult<T> = Result<T, ScanError>;

/// Severity levels for executor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation failed but system is healthy
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// A collaborator scan failed
    KeyscanScanFailed,
    /// The caller cancelled the query
    KeyscanQueryCancelled,
}

impl ExecutorErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::KeyscanScanFailed => "KEYSCAN_SCAN_FAILED",
            ExecutorErrorCode::KeyscanQueryCancelled => "KEYSCAN_QUERY_CANCELLED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error type with full context
#[derive(Debug)]
pub struct ExecutorError {
    /// Error code
    code: ExecutorErrorCode,
    /// Human-readable message
    message: String,
    /// Field being scanned, if applicable
    field: Option<String>,
    /// Scans completed before the query stopped
    scans_executed: usize,
    /// Underlying scan failure
    source: Option<ScanError>,
}

impl ExecutorError {
    /// Create a scan failed error
    pub fn scan_failed(field: impl Into<String>, scans_executed: usize, source: ScanError) -> Self {
        let f = field.into();
        Self {
            code: ExecutorErrorCode::KeyscanScanFailed,
            message: format!("Scan of '{}' failed: {}", f, source),
            field: Some(f),
            scans_executed,
            source: Some(source),
        }
    }

    /// Create a scan failed error for a full scan
    pub fn scan_all_failed(source: ScanError) -> Self {
        Self {
            code: ExecutorErrorCode::KeyscanScanFailed,
            message: format!("Full scan failed: {}", source),
            field: None,
            scans_executed: 0,
            source: Some(source),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(scans_executed: usize) -> Self {
        Self {
            code: ExecutorErrorCode::KeyscanQueryCancelled,
            message: format!("Query cancelled after {} scans", scans_executed),
            field: None,
            scans_executed,
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecutorErrorCode {
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

    /// Scans completed before the query stopped
    pub fn scans_executed(&self) -> usize {
        self.scans_executed
    }

    /// Returns true if the caller cancelled the query
    pub fn is_cancelled(&self) -> bool {
        self.code == ExecutorErrorCode::KeyscanQueryCancelled
    }

    /// The collaborator error, if a scan failed
    pub fn scan_error(&self) -> Option<&ScanError> {
        self.source.as_ref()
    }
}

impl fmt::Display for ExecutorError {
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

impl std::error::Error for ExecutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
