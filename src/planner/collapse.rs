//! Per-field range collapsing
//!
//! All ranges of one field are folded into their intersection. The fold
//! starts from the unbounded range, so the result is never wider than any
//! contributing range.

use super::range::Range;

/// Collapses the ranges of a single field into one minimal range.
pub struct FieldRangeCollapser;

impl FieldRangeCollapser {
    /// Intersects every range.
    ///
    /// Returns `Range::Empty` as soon as the intersection holds no key.
    /// With no input the unbounded range is returned.
    pub fn collapse<'a>(ranges: impl IntoIterator<Item = &'a Range>) -> Range {
        let mut collapsed = Range::unbounded();
        for range in ranges {
            collapsed = collapsed.intersect(range);
            if collapsed.is_empty() {
                break;
            }
        }
        collapsed
    }
}
