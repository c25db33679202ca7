//! Predicate to key-range translation
//!
//! | op      | range            |
//! |---------|------------------|
//! | `EQ v`  | `[v, v]`         |
//! | `GT v`  | `(v, +inf)`      |
//! | `GTE v` | `[v, +inf)`      |
//! | `LT v`  | `(-inf, v)`      |
//! | `LTE v` | `(-inf, v]`      |
//!
//! Membership and regex predicates cannot be answered from an ordered
//! index and are rejected; callers post-filter them instead.

use crate::index::IndexKey;

use super::ast::{FilterOp, Predicate};
use super::errors::{PlannerError, PlannerResult};
use super::range::Range;

/// Stateless translator from predicates to ranges.
pub struct PredicateTranslator;

impl PredicateTranslator {
    /// Translates one predicate into a range over its field's key space.
    pub fn translate(predicate: &Predicate) -> PlannerResult<Range> {
        let key = Self::key_for(predicate)?;
        Ok(match predicate.op {
            FilterOp::Eq(_) => Range::point(key),
            FilterOp::Gt(_) => Range::greater_than(key),
            FilterOp::Gte(_) => Range::at_least(key),
            FilterOp::Lt(_) => Range::less_than(key),
            FilterOp::Lte(_) => Range::at_most(key),
            // key_for already rejected these
            FilterOp::In(_) | FilterOp::Contains(_) | FilterOp::Matches(_) => {
                return Err(Self::unsupported(predicate));
            }
        })
    }

    /// Encodes the comparison value of an indexable predicate.
    pub fn key_for(predicate: &Predicate) -> PlannerResult<IndexKey> {
        let value = predicate
            .op
            .value()
            .ok_or_else(|| Self::unsupported(predicate))?;
        IndexKey::from_json(value).ok_or_else(|| {
            PlannerError::unsupported_operator(
                &predicate.field,
                format!("value {} has no index key", value),
            )
        })
    }

    fn unsupported(predicate: &Predicate) -> PlannerError {
        PlannerError::unsupported_operator(
            &predicate.field,
            format!("operator '{}' requires post-filtering", predicate.op.op_name()),
        )
    }
}
