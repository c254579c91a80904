//! Row selections applied consistently across fields.

use bufr_row_set::RowSet;

/// A selection of outer rows, computed once by a filtering policy and handed to every
/// `get` call whose outputs must stay row aligned.
///
/// The domain of the selection is either the frames (`group_by == None`) or the groups
/// produced by grouping on a named field. A frame filter is applied before any
/// grouping; a group filter only applies to gets grouped by the same field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    pub group_by: Option<String>,
    pub rows: RowSet,
}

impl RowFilter {
    /// A filter over frames.
    pub fn frames(rows: RowSet) -> RowFilter {
        RowFilter {
            group_by: None,
            rows,
        }
    }

    /// A filter over the groups of `group_by`.
    pub fn groups(group_by: impl Into<String>, rows: RowSet) -> RowFilter {
        RowFilter {
            group_by: Some(group_by.into()),
            rows,
        }
    }

    /// Returns `true` if every row of the domain is kept.
    pub fn is_full(&self) -> bool {
        self.rows.is_full()
    }

    /// Restricts this filter to the rows of `other` as well.
    ///
    /// Returns `None` if the two filters have different domains or spans.
    pub fn intersect(&self, other: &RowFilter) -> Option<RowFilter> {
        if self.group_by != other.group_by || self.rows.span() != other.rows.span() {
            return None;
        }
        Some(RowFilter {
            group_by: self.group_by.clone(),
            rows: self.rows.intersect(&other.rows),
        })
    }
}
