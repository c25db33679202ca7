//! Key ranges over a single field's key space
//!
//! A range end is modelled as a `(key, inclusive)` pair through
//! `std::ops::Bound`, so no successor key is ever materialized:
//! `LTE 47` is `Included(47)` rather than "LT succ(47)".
//!
//! Ranges carry no field name. They are only ever intersected inside a
//! `FieldGroup`, which owns the field.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound;

use crate::index::IndexKey;

/// A non-empty span of keys, the unit handed to an index scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyRange {
    start: Bound<IndexKey>,
    end: Bound<IndexKey>,
}

impl KeyRange {
    /// Lower bound of the span
    pub fn start(&self) -> &Bound<IndexKey> {
        &self.start
    }

    /// Upper bound of the span
    pub fn end(&self) -> &Bound<IndexKey> {
        &self.end
    }

    /// Both bounds as borrowed `Bound`s, ready for `BTreeMap::range`.
    pub fn as_bounds(&self) -> (Bound<&IndexKey>, Bound<&IndexKey>) {
        (self.start.as_ref(), self.end.as_ref())
    }

    /// Returns true if neither side constrains the key
    pub fn is_unbounded(&self) -> bool {
        matches!(
            (&self.start, &self.end),
            (Bound::Unbounded, Bound::Unbounded)
        )
    }

    /// Returns true if the span holds exactly one key, as an equality does.
    pub fn is_point(&self) -> bool {
        matches!(
            (&self.start, &self.end),
            (Bound::Included(s), Bound::Included(e)) if s == e
        )
    }

    /// Returns true if `key` falls inside the span
    pub fn contains(&self, key: &IndexKey) -> bool {
        let above_start = match &self.start {
            Bound::Included(s) => key >= s,
            Bound::Excluded(s) => key > s,
            Bound::Unbounded => true,
        };
        let below_end = match &self.end {
            Bound::Included(e) => key <= e,
            Bound::Excluded(e) => key < e,
            Bound::Unbounded => true,
        };
        above_start && below_end
    }
}

/// A range of keys on one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Range {
    /// No key satisfies the range
    Empty,
    /// A satisfiable span (possibly unbounded on one or both sides)
    Span(KeyRange),
}

impl Range {
    /// Builds a range from two bounds, normalizing unsatisfiable spans to Empty.
    pub fn new(start: Bound<IndexKey>, end: Bound<IndexKey>) -> Self {
        let empty = match (&start, &end) {
            (Bound::Unbounded, _) | (_, Bound::Unbounded) => false,
            (Bound::Included(s), Bound::Included(e)) => s > e,
            (Bound::Included(s), Bound::Excluded(e))
            | (Bound::Excluded(s), Bound::Included(e))
            | (Bound::Excluded(s), Bound::Excluded(e)) => s >= e,
        };
        if empty {
            Range::Empty
        } else {
            Range::Span(KeyRange { start, end })
        }
    }

    /// The range that constrains nothing (identity for intersection)
    pub fn unbounded() -> Self {
        Range::Span(KeyRange {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
        })
    }

    /// `[key, key]`
    pub fn point(key: IndexKey) -> Self {
        Self::new(Bound::Included(key.clone()), Bound::Included(key))
    }

    /// `(key, +inf)`
    pub fn greater_than(key: IndexKey) -> Self {
        Self::new(Bound::Excluded(key), Bound::Unbounded)
    }

    /// `[key, +inf)`
    pub fn at_least(key: IndexKey) -> Self {
        Self::new(Bound::Included(key), Bound::Unbounded)
    }

    /// `(-inf, key)`
    pub fn less_than(key: IndexKey) -> Self {
        Self::new(Bound::Unbounded, Bound::Excluded(key))
    }

    /// `(-inf, key]`
    pub fn at_most(key: IndexKey) -> Self {
        Self::new(Bound::Unbounded, Bound::Included(key))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Range::Empty)
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Range::Span(span) if span.is_unbounded())
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Range::Span(span) if span.is_point())
    }

    /// The scannable span, if any
    pub fn as_span(&self) -> Option<&KeyRange> {
        match self {
            Range::Empty => None,
            Range::Span(span) => Some(span),
        }
    }

    pub fn contains(&self, key: &IndexKey) -> bool {
        self.as_span().is_some_and(|span| span.contains(key))
    }

    /// Intersects two ranges of the same field.
    ///
    /// The start is the tighter (greater) of the two starts, the end the
    /// tighter (smaller) of the two ends. On equal keys the exclusive bound
    /// is the tighter one.
    pub fn intersect(&self, other: &Range) -> Range {
        let (a, b) = match (self, other) {
            (Range::Span(a), Range::Span(b)) => (a, b),
            _ => return Range::Empty,
        };
        let start = tighter_start(&a.start, &b.start).clone();
        let end = tighter_end(&a.end, &b.end).clone();
        Range::new(start, end)
    }
}

/// Picks the more restrictive of two lower bounds.
fn tighter_start<'a>(a: &'a Bound<IndexKey>, b: &'a Bound<IndexKey>) -> &'a Bound<IndexKey> {
    match (a, b) {
        (Bound::Unbounded, _) => b,
        (_, Bound::Unbounded) => a,
        (Bound::Included(x) | Bound::Excluded(x), Bound::Included(y) | Bound::Excluded(y)) => {
            match x.cmp(y) {
                Ordering::Greater => a,
                Ordering::Less => b,
                Ordering::Equal => {
                    if matches!(a, Bound::Excluded(_)) {
                        a
                    } else {
                        b
                    }
                }
            }
        }
    }
}

/// Picks the more restrictive of two upper bounds.
fn tighter_end<'a>(a: &'a Bound<IndexKey>, b: &'a Bound<IndexKey>) -> &'a Bound<IndexKey> {
    match (a, b) {
        (Bound::Unbounded, _) => b,
        (_, Bound::Unbounded) => a,
        (Bound::Included(x) | Bound::Excluded(x), Bound::Included(y) | Bound::Excluded(y)) => {
            match x.cmp(y) {
                Ordering::Less => a,
                Ordering::Greater => b,
                Ordering::Equal => {
                    if matches!(a, Bound::Excluded(_)) {
                        a
                    } else {
                        b
                    }
                }
            }
        }
    }
}

impl fmt::Display for KeyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.start {
            Bound::Included(k) => write!(f, "[{}", k)?,
            Bound::Excluded(k) => write!(f, "({}", k)?,
            Bound::Unbounded => f.write_str("(-inf")?,
        }
        f.write_str(", ")?;
        match &self.end {
            Bound::Included(k) => write!(f, "{}]", k),
            Bound::Excluded(k) => write!(f, "{})", k),
            Bound::Unbounded => f.write_str("+inf)"),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Range::Empty => f.write_str("EMPTY"),
            Range::Span(span) => write!(f, "{}", span),
        }
    }
}
