//! Query Planner subsystem for keyscan
//!
//! Turns a conjunction of comparison predicates into an ordered list of
//! per-field range scans.
//!
//! # Design Principles
//!
//! - Deterministic: Same predicates → same plan
//! - Minimal: One scan per field, never wider than any predicate
//! - Field-scoped: Ranges are never merged across fields
//! - Early: Contradictions are detected before any scan
//!
//! # Group Ordering (strict order)
//!
//! 1. Single-point (equality-like) ranges
//! 2. Remaining ranges
//!
//! Ties broken lexicographically by field name.

mod ast;
mod collapse;
mod errors;
mod explain;
mod planner;
mod range;
mod translate;

pub use ast::{FilterOp, Predicate, Query};
pub use collapse::FieldRangeCollapser;
pub use errors::{PlannerError, PlannerErrorCode, PlannerResult};
pub use explain::{ExplainGroup, ExplainPlan};
pub use planner::{
    EmptyQueryPolicy, ExecutionPlan, FieldGroup, FieldGroupPlanner, PlanKind, PlannerConfig,
};
pub use range::{KeyRange, Range};
pub use translate::PredicateTranslator;
