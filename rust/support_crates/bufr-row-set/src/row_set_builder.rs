use crate::RowSet;

/// Accumulates rows in increasing order and produces a [`RowSet`].
#[derive(Debug, Default)]
pub struct RowSetBuilder {
    rows: Vec<usize>,
}

impl RowSetBuilder {
    pub fn new() -> RowSetBuilder {
        RowSetBuilder::default()
    }

    /// The smallest row that may be pushed next.
    #[inline]
    pub fn next_pos(&self) -> usize {
        self.rows.last().map_or(0, |&last| last + 1)
    }

    /// Appends a row.
    ///
    /// Panics: if `row` is smaller than [`next_pos`](Self::next_pos).
    #[inline]
    pub fn push_position(&mut self, row: usize) {
        assert!(row >= self.next_pos(), "rows must be pushed in increasing order");
        self.rows.push(row);
    }

    /// Appends every row of `range`.
    pub fn push_range(&mut self, range: std::ops::Range<usize>) {
        if range.is_empty() {
            return;
        }
        assert!(range.start >= self.next_pos(), "rows must be pushed in increasing order");
        self.rows.extend(range);
    }

    /// Finishes the set over [0, span). Rows ≥ span are dropped.
    pub fn build(mut self, span: usize) -> RowSet {
        let end = self.rows.partition_point(|&row| row < span);
        self.rows.truncate(end);
        RowSet::new(self.rows, span)
    }
}
