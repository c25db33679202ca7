//! Query Executor subsystem for keyscan
//!
//! Consumes execution plans and produces deterministic results.
//!
//! # Execution Flow (strict order)
//!
//! 1. Skip all scanning for trivially empty plans
//! 2. Scan field groups in plan order
//! 3. Intersect each scan into the running candidate set
//! 4. Short-circuit as soon as the candidate set is empty
//! 5. Return surviving IDs with statistics
//!
//! # Invariants
//!
//! - The candidate set never grows after the first scan
//! - A group is never scanned once an earlier group emptied the set
//! - Scan failures and cancellation abort the query; no partial results

mod cancel;
mod candidate;
mod errors;
mod executor;
mod result;

pub use cancel::CancelToken;
pub use candidate::{CandidateSet, DocIdBounds};
pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult, ScanError, ScanResult};
pub use executor::{AndExecutor, ExecutorConfig, ScanSource};
pub use result::{QueryOutput, QueryStats};
