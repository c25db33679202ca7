//! Observability events for keyscan
//!
//! Every log line names one of these events. Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events in query processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Query lifecycle
    /// Engine received a query
    QueryBegin,
    /// Predicates grouped and collapsed into a plan
    QueryPlanned,
    /// A field group collapsed to an empty range
    QueryContradiction,
    /// One index scan issued
    QueryScan,
    /// Candidate set emptied, remaining groups skipped
    QueryShortCircuit,
    /// Query produced a result
    QueryComplete,
    /// Planner refused the query
    QueryRejected,
    /// Query stopped by its cancel token
    QueryCancelled,
    /// Index scan returned an error
    QueryScanFailed,
    /// Query aborted
    QueryFailed,

    // Collaborator contract
    /// Scan output was not sorted/deduplicated and had to be normalized
    ScanResultUnordered,

    // Engine
    /// Configuration applied
    ConfigLoaded,
    /// Plan explained without execution
    ExplainComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::QueryBegin => "QUERY_BEGIN",
            Event::QueryPlanned => "QUERY_PLANNED",
            Event::QueryContradiction => "QUERY_CONTRADICTION",
            Event::QueryScan => "QUERY_SCAN",
            Event::QueryShortCircuit => "QUERY_SHORT_CIRCUIT",
            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryCancelled => "QUERY_CANCELLED",
            Event::QueryScanFailed => "QUERY_SCAN_FAILED",
            Event::QueryFailed => "QUERY_FAILED",

            Event::ScanResultUnordered => "SCAN_RESULT_UNORDERED",

            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ExplainComplete => "EXPLAIN_COMPLETE",
        }
    }

    /// Severity the event is normally logged at
    pub fn default_severity(&self) -> Severity {
        match self {
            Event::QueryScan | Event::QueryShortCircuit => Severity::Trace,
            Event::QueryRejected | Event::QueryCancelled | Event::ScanResultUnordered => {
                Severity::Warn
            }
            Event::QueryScanFailed | Event::QueryFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Event; 13] = [
        Event::QueryBegin,
        Event::QueryPlanned,
        Event::QueryContradiction,
        Event::QueryScan,
        Event::QueryShortCircuit,
        Event::QueryComplete,
        Event::QueryRejected,
        Event::QueryCancelled,
        Event::QueryScanFailed,
        Event::QueryFailed,
        Event::ScanResultUnordered,
        Event::ConfigLoaded,
        Event::ExplainComplete,
    ];

    #[test]
    fn test_all_events_have_string_representation() {
        for event in ALL {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_names_unique() {
        let mut names: Vec<_> = ALL.iter().map(Event::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_default_severities() {
        assert_eq!(Event::QueryScan.default_severity(), Severity::Trace);
        assert_eq!(Event::QueryRejected.default_severity(), Severity::Warn);
        assert_eq!(Event::QueryScanFailed.default_severity(), Severity::Error);
        assert_eq!(Event::QueryComplete.default_severity(), Severity::Info);
    }

    #[test]
    fn test_executor_event_severities() {
        assert_eq!(Event::QueryContradiction.default_severity(), Severity::Info);
        assert_eq!(Event::QueryScanFailed.default_severity(), Severity::Error);
        assert_eq!(Event::QueryScan.default_severity(), Severity::Trace);
        assert_eq!(Event::QueryShortCircuit.default_severity(), Severity::Trace);
        assert_eq!(Event::ScanResultUnordered.default_severity(), Severity::Warn);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::QueryShortCircuit), "QUERY_SHORT_CIRCUIT");
    }
}
