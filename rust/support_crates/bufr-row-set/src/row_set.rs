//! Ordered set of row indices over a fixed conceptual space.
//!
//! RowSet models a set S ⊆ [0, span) where span is the number of rows of the
//! dimension the set selects from. The span is part of the identity of a RowSet: two
//! sets with the same rows but different spans are distinct, and a set can only be
//! applied to a dimension whose extent equals its span.
//!
//! Representation
//! - Rows are kept as a strictly increasing list of indices, all below span.
//!
//! Key properties and invariants
//! - Iteration yields rows in increasing order, so applying a set to several arrays
//!   keeps their rows aligned.
//! - Methods that take a row may panic if the row is outside [0, span).

/// An ordered set of row indices constrained to the domain [0, span).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowSet {
    rows: Vec<usize>,
    span: usize,
}

impl RowSet {
    pub(crate) fn new(rows: Vec<usize>, span: usize) -> RowSet {
        let set = RowSet { rows, span };
        set.check_basic_invariants();
        set
    }

    /// Create an empty set over [0, span).
    pub fn empty(span: usize) -> RowSet {
        RowSet {
            rows: Vec::new(),
            span,
        }
    }

    /// Create a full set over [0, span).
    pub fn full(span: usize) -> RowSet {
        RowSet {
            rows: (0..span).collect(),
            span,
        }
    }

    /// Build a set from an iterator of rows.
    ///
    /// Requirements:
    /// - The iterator must be strictly increasing.
    /// - Rows < span are considered; rows ≥ span are ignored.
    ///
    /// Panics: if the iterator is not strictly increasing.
    pub fn from_positions(span: usize, rows: impl Iterator<Item = usize>) -> RowSet {
        RowSet::new(rows.take_while(|&row| row < span).collect(), span)
    }

    /// Build a set from a validity mask; the span is the mask length.
    pub fn from_mask(mask: &[bool]) -> RowSet {
        RowSet {
            rows: mask
                .iter()
                .enumerate()
                .filter_map(|(row, &valid)| valid.then_some(row))
                .collect(),
            span: mask.len(),
        }
    }

    /// Return the span that defines the domain [0, span).
    #[inline]
    pub fn span(&self) -> usize {
        self.span
    }

    /// Test membership of row in the set.
    ///
    /// Complexity: O(log n).
    ///
    /// Panics: if row ≥ span.
    pub fn contains(&self, row: usize) -> bool {
        assert!(row < self.span, "row {row} out of span {}", self.span);
        self.rows.binary_search(&row).is_ok()
    }

    /// Count the number of rows present in the set.
    #[inline]
    pub fn count_positions(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `true` if every row of the span is present.
    pub fn is_full(&self) -> bool {
        self.rows.len() == self.span
    }

    /// Rows in increasing order.
    pub fn as_slice(&self) -> &[usize] {
        &self.rows
    }

    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    /// Returns the index of `row` among the rows of this set, if present.
    ///
    /// This is the row's position in an array projected with this set.
    pub fn rank(&self, row: usize) -> Option<usize> {
        self.rows.binary_search(&row).ok()
    }

    /// Intersection of two sets over the same span.
    ///
    /// Panics: if the spans differ.
    pub fn intersect(&self, other: &RowSet) -> RowSet {
        assert_eq!(self.span, other.span);
        let mut rows = Vec::with_capacity(self.rows.len().min(other.rows.len()));
        let (mut i, mut j) = (0, 0);
        while i < self.rows.len() && j < other.rows.len() {
            match self.rows[i].cmp(&other.rows[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    rows.push(self.rows[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        RowSet::new(rows, self.span)
    }

    /// Union of two sets over the same span.
    ///
    /// Panics: if the spans differ.
    pub fn union(&self, other: &RowSet) -> RowSet {
        assert_eq!(self.span, other.span);
        let mut rows = Vec::with_capacity(self.rows.len() + other.rows.len());
        let (mut i, mut j) = (0, 0);
        while i < self.rows.len() || j < other.rows.len() {
            let next = match (self.rows.get(i), other.rows.get(j)) {
                (Some(&a), Some(&b)) if a < b => {
                    i += 1;
                    a
                }
                (Some(&a), Some(&b)) if a > b => {
                    j += 1;
                    b
                }
                (Some(&a), Some(_)) => {
                    i += 1;
                    j += 1;
                    a
                }
                (Some(&a), None) => {
                    i += 1;
                    a
                }
                (None, Some(&b)) => {
                    j += 1;
                    b
                }
                (None, None) => unreachable!(),
            };
            rows.push(next);
        }
        RowSet::new(rows, self.span)
    }

    /// Complement within [0, span).
    pub fn complement(&self) -> RowSet {
        let mut rows = Vec::with_capacity(self.span - self.rows.len());
        let mut present = self.rows.iter().copied().peekable();
        for row in 0..self.span {
            if present.peek() == Some(&row) {
                present.next();
            } else {
                rows.push(row);
            }
        }
        RowSet { rows, span: self.span }
    }

    /// Returns `true` if every row of `self` is also in `other`.
    pub fn is_subset_of(&self, other: &RowSet) -> bool {
        self.span == other.span && self.rows.iter().all(|&row| other.contains(row))
    }

    /// Re-expresses a subset of `self` in the coordinates of an array already
    /// projected with `self`: row `r` of the result is the rank of `r` in `self`.
    ///
    /// Returns `None` if `subset` is not a subset of `self`.
    pub fn relative_to(&self, subset: &RowSet) -> Option<RowSet> {
        if subset.span != self.span {
            return None;
        }
        let rows = subset
            .positions()
            .map(|row| self.rank(row))
            .collect::<Option<Vec<_>>>()?;
        Some(RowSet::new(rows, self.rows.len()))
    }

    fn check_basic_invariants(&self) {
        assert!(
            self.rows.windows(2).all(|w| w[0] < w[1]),
            "rows must be strictly increasing"
        );
        assert!(self.rows.last().is_none_or(|&last| last < self.span));
    }
}
