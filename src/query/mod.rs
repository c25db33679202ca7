//! Query engine subsystem for keyscan
//!
//! Ties planner and executor together behind one facade.
//!
//! # Flow
//!
//! 1. Assign a query id and log `QUERY_BEGIN`
//! 2. Plan (rejections end the query with `QUERY_REJECTED`)
//! 3. Execute against the scan source
//! 4. Record metrics and log `QUERY_COMPLETE`, `QUERY_CANCELLED` or `QUERY_FAILED`

mod config;
mod engine;
mod errors;

pub use config::EngineConfig;
pub use engine::QueryEngine;
pub use errors::{QueryError, QueryResult};
