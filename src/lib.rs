//! keyscan - conjunctive range queries over an ordered document index
//!
//! A query is a list of predicates joined by AND. The planner groups them
//! by field and collapses each group to one key range; the executor issues
//! one index scan per group and intersects the results, stopping as soon as
//! nothing can match.
//!
//! ```ignore
//! use keyscan::index::MemoryIndex;
//! use keyscan::planner::{Predicate, Query};
//! use keyscan::query::QueryEngine;
//! use serde_json::json;
//!
//! let mut index = MemoryIndex::new();
//! index.insert_document("doc1", &json!({"age": 40}))?;
//!
//! let engine = QueryEngine::with_defaults(index);
//! let query = Query::new().with_predicate(Predicate::gte("age", json!(21)));
//! let output = engine.search(&query)?;
//! ```

pub mod executor;
pub mod index;
pub mod observability;
pub mod planner;
pub mod query;
