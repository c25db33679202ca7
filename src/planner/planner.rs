//! Field-group planner
//!
//! Produces deterministic execution plans for a conjunction of predicates.
//!
//! Group ordering (strict):
//! 1. Groups whose collapsed range is a single point (equality-like)
//! 2. All other groups
//!
//! Ties broken lexicographically by field name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::index::KeyKind;

use super::ast::{Predicate, Query};
use super::collapse::FieldRangeCollapser;
use super::errors::{PlannerError, PlannerResult};
use super::range::{KeyRange, Range};
use super::translate::PredicateTranslator;

/// What to do with a query that has no predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyQueryPolicy {
    /// Reject with KEYSCAN_EMPTY_QUERY
    #[default]
    Reject,
    /// Answer with every indexed document
    MatchAll,
}

/// Planner configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Handling of zero-predicate queries (default: reject)
    #[serde(default)]
    pub empty_query: EmptyQueryPolicy,
}

impl PlannerConfig {
    /// Config that answers empty queries with all documents
    pub fn match_all_on_empty() -> Self {
        Self {
            empty_query: EmptyQueryPolicy::MatchAll,
        }
    }
}

/// All predicates on one field, reduced to one range.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroup {
    field: String,
    predicates: Vec<Predicate>,
    range: Range,
}

impl FieldGroup {
    /// Translates and collapses the predicates of one field.
    ///
    /// Every predicate must name `field` and compare against one key kind.
    fn build(field: String, predicates: Vec<Predicate>) -> PlannerResult<Self> {
        let mut kind: Option<KeyKind> = None;
        let mut ranges = Vec::with_capacity(predicates.len());

        for pred in &predicates {
            debug_assert_eq!(pred.field, field);
            let key = PredicateTranslator::key_for(pred)?;
            match kind {
                Some(k) if k != key.kind() => {
                    return Err(PlannerError::incompatible_range_types(&field, k, key.kind()));
                }
                _ => kind = Some(key.kind()),
            }
            ranges.push(PredicateTranslator::translate(pred)?);
        }

        let range = FieldRangeCollapser::collapse(&ranges);
        // Guard only: `plan` never builds a group without a comparison, and
        // every comparison bounds at least one side.
        if range.is_unbounded() {
            return Err(PlannerError::unbounded_range(&field));
        }

        Ok(Self {
            field,
            predicates,
            range,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// The collapsed range of the group
    pub fn range(&self) -> &Range {
        &self.range
    }

    /// The span to scan; None when the group is a contradiction
    pub fn scan_range(&self) -> Option<&KeyRange> {
        self.range.as_span()
    }

    /// Equality-like groups are expected to match the fewest documents
    pub fn is_point(&self) -> bool {
        self.range.is_point()
    }
}

/// How a plan is to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanKind {
    /// Scan the groups in order, intersecting results
    Scan,
    /// A group collapsed to an empty range; nothing can match
    TriviallyEmpty {
        /// First field (in execution order) whose range is empty
        field: String,
    },
    /// No predicates; every document matches
    MatchAll,
}

impl PlanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::Scan => "SCAN",
            PlanKind::TriviallyEmpty { .. } => "EMPTY",
            PlanKind::MatchAll => "MATCH_ALL",
        }
    }
}

/// Immutable execution plan (no runtime state)
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionPlan {
    groups: Vec<FieldGroup>,
    kind: PlanKind,
}

impl ExecutionPlan {
    /// Groups in execution order
    pub fn groups(&self) -> &[FieldGroup] {
        &self.groups
    }

    pub fn kind(&self) -> &PlanKind {
        &self.kind
    }

    /// Returns true if execution needs no scan at all
    pub fn is_trivially_empty(&self) -> bool {
        matches!(self.kind, PlanKind::TriviallyEmpty { .. })
    }

    /// Field names in execution order
    pub fn field_order(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.field()).collect()
    }
}

/// Planner that produces deterministic plans
#[derive(Debug, Clone, Default)]
pub struct FieldGroupPlanner {
    config: PlannerConfig,
}

impl FieldGroupPlanner {
    /// Creates a new planner
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Plans a query.
    pub fn plan_query(&self, query: &Query) -> PlannerResult<ExecutionPlan> {
        self.plan(&query.predicates)
    }

    /// Plans a conjunction of predicates.
    ///
    /// This method is deterministic: same predicates (in any order) → same plan.
    pub fn plan(&self, predicates: &[Predicate]) -> PlannerResult<ExecutionPlan> {
        // 1. Zero predicates follow the configured policy
        if predicates.is_empty() {
            return match self.config.empty_query {
                EmptyQueryPolicy::Reject => Err(PlannerError::empty_query()),
                EmptyQueryPolicy::MatchAll => Ok(ExecutionPlan {
                    groups: Vec::new(),
                    kind: PlanKind::MatchAll,
                }),
            };
        }

        // 2. Partition by field
        let mut by_field: BTreeMap<String, Vec<Predicate>> = BTreeMap::new();
        for pred in predicates {
            by_field
                .entry(pred.field.clone())
                .or_default()
                .push(pred.clone());
        }

        // 3. Collapse each group; any error aborts the whole plan
        let mut groups = by_field
            .into_iter()
            .map(|(field, preds)| FieldGroup::build(field, preds))
            .collect::<PlannerResult<Vec<_>>>()?;

        // 4. Points first, then by field name. BTreeMap already yielded
        // field order, and the sort is stable.
        groups.sort_by_key(|g| !g.is_point());

        let kind = match groups.iter().find(|g| g.range().is_empty()) {
            Some(g) => PlanKind::TriviallyEmpty {
                field: g.field().to_string(),
            },
            None => PlanKind::Scan,
        };

        Ok(ExecutionPlan { groups, kind })
    }
}
