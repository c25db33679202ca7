//! Document index subsystem for keyscan
//!
//! Stores (field, key, docID) entries ordered by key, then docID, and serves
//! the range scans the executor issues.
//!
//! # Design Principles
//!
//! - In-memory only: No persistence
//! - Deterministic: BTreeMap iteration order, sorted doc IDs
//! - Typed keys: Null < Bool < Number < String
//!
//! # Invariants
//!
//! - Scans return doc IDs sorted ascending without duplicates
//! - Re-indexing a document replaces all of its previous entries

mod errors;
mod key;
mod manager;
mod paths;
mod tree;

pub use errors::{IndexError, IndexErrorCode, IndexResult};
pub use key::{IndexKey, KeyKind};
pub use manager::MemoryIndex;
pub use paths::{escape_key, path_values, PATH_ESCAPE, PATH_SEPARATOR};
pub use tree::{DocId, FieldIndex};
