//! Observability subsystem for keyscan
//!
//! - Structured logging (JSON)
//! - Query metrics
//! - Lifecycle event tracing
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on execution
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use keyscan::observability::{Event, Logger, QueryMetrics, ObservationScope};
//!
//! Logger::info(Event::QueryPlanned.as_str(), &[("groups", "2")]);
//!
//! let metrics = QueryMetrics::new();
//! metrics.increment_queries_executed();
//!
//! let scope = ObservationScope::new("QUERY");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, QueryMetrics};
pub use scope::{ObservationScope, Timer};

/// Log an event at its default severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = event.default_severity();
    if severity >= Severity::Error {
        Logger::log_stderr(severity, event.as_str(), fields);
    } else {
        Logger::log(severity, event.as_str(), fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        log_event(Event::ConfigLoaded, &[("log_level", "INFO")]);
        log_event(Event::QueryScanFailed, &[("field", "foo")]);
    }
}
