//! Query AST structures
//!
//! A query is a flat list of predicates, all combined with AND.

use serde_json::Value;

/// Filter operation types
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Equality: field = value
    Eq(Value),
    /// Greater than or equal: field >= value
    Gte(Value),
    /// Greater than: field > value
    Gt(Value),
    /// Less than or equal: field <= value
    Lte(Value),
    /// Less than: field < value
    Lt(Value),
    /// Set membership: field in [values]
    In(Vec<Value>),
    /// Array membership: field (an array) contains value
    Contains(Value),
    /// Regular expression match
    Matches(String),
}

impl FilterOp {
    /// Returns true if this is an equality operation
    pub fn is_equality(&self) -> bool {
        matches!(self, FilterOp::Eq(_))
    }

    /// Returns true if this is a range operation
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            FilterOp::Gte(_) | FilterOp::Gt(_) | FilterOp::Lte(_) | FilterOp::Lt(_)
        )
    }

    /// Returns true if an ordered index can answer this operation
    pub fn is_indexable(&self) -> bool {
        self.is_equality() || self.is_range()
    }

    /// The comparison value, for indexable operations
    pub fn value(&self) -> Option<&Value> {
        match self {
            FilterOp::Eq(v)
            | FilterOp::Gte(v)
            | FilterOp::Gt(v)
            | FilterOp::Lte(v)
            | FilterOp::Lt(v) => Some(v),
            FilterOp::In(_) | FilterOp::Contains(_) | FilterOp::Matches(_) => None,
        }
    }

    /// Returns the operation name for explain output
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "eq",
            FilterOp::Gte(_) => "gte",
            FilterOp::Gt(_) => "gt",
            FilterOp::Lte(_) => "lte",
            FilterOp::Lt(_) => "lt",
            FilterOp::In(_) => "in",
            FilterOp::Contains(_) => "contains",
            FilterOp::Matches(_) => "matches",
        }
    }
}

/// A single predicate (field + operation)
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field path, dotted for nested values ("a.b")
    pub field: String,
    /// Filter operation
    pub op: FilterOp,
}

impl Predicate {
    pub fn new(field: impl Into<String>, op: FilterOp) -> Self {
        Self {
            field: field.into(),
            op,
        }
    }

    /// Create an equality predicate
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Eq(value))
    }

    /// Create a range predicate (gte)
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Gte(value))
    }

    /// Create a range predicate (lte)
    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Lte(value))
    }

    /// Create a range predicate (gt)
    pub fn gt(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Gt(value))
    }

    /// Create a range predicate (lt)
    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Lt(value))
    }

    pub fn is_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(field, FilterOp::In(values))
    }

    pub fn contains(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOp::Contains(value))
    }

    pub fn matches(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Matches(pattern.into()))
    }

    /// Returns true if this is an equality predicate
    pub fn is_equality(&self) -> bool {
        self.op.is_equality()
    }

    /// Returns true if this is a range predicate
    pub fn is_range(&self) -> bool {
        self.op.is_range()
    }
}

/// A conjunction of predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Filter predicates (all combined with AND)
    pub predicates: Vec<Predicate>,
}

impl Query {
    /// Creates an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query from a list of predicates
    pub fn from_predicates(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self {
            predicates: predicates.into_iter().collect(),
        }
    }

    /// Adds a predicate
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Adds an equality filter
    pub fn filter_eq(self, field: impl Into<String>, value: Value) -> Self {
        self.with_predicate(Predicate::eq(field, value))
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Number of distinct fields referenced
    pub fn field_count(&self) -> usize {
        let mut fields: Vec<&str> = self.predicates.iter().map(|p| p.field.as_str()).collect();
        fields.sort_unstable();
        fields.dedup();
        fields.len()
    }
}
