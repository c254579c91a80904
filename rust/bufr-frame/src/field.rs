//! Per-path storage of a decoded message.

use bufr_common::{Result, error::Error, verify_data};
use bufr_format::Query;

use crate::data::Data;

/// The values a message holds for one query path, with their repeat structure.
///
/// `counts[d]` lists the repeat counts observed at nesting depth `d + 1`, one entry per
/// instance of the enclosing level in depth-first order: `counts[0]` has exactly one
/// entry (the number of repeats of the outermost repeated sequence within the message),
/// and `counts[d]` has as many entries as the sum of `counts[d - 1]`. The values are
/// stored in the same depth-first order; their number is the sum of the innermost
/// counts, or at most one for a field without repeat levels.
///
/// `dim_paths[d]` is the query path of the sequence responsible for dimension `d`, where
/// dimension 0 is the message itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldData {
    values: Data,
    counts: Vec<Vec<usize>>,
    dim_paths: Vec<Query>,
}

impl FieldData {
    /// Creates field data for a value without repeat levels.
    pub fn scalar(values: impl Into<Data>) -> Result<FieldData> {
        FieldData::new(values, Vec::new(), vec![Query::root()])
    }

    /// Creates field data with repeat counts, validating that the counts and values
    /// describe a consistent nesting structure.
    pub fn new(
        values: impl Into<Data>,
        counts: Vec<Vec<usize>>,
        dim_paths: Vec<Query>,
    ) -> Result<FieldData> {
        let field = FieldData {
            values: values.into(),
            counts,
            dim_paths,
        };
        field.validate()?;
        Ok(field)
    }

    /// Creates field data from signed repeat counts, as produced by decoders that report
    /// counts with a signed integer type. Negative counts are rejected.
    pub fn from_signed_counts(
        values: impl Into<Data>,
        counts: Vec<Vec<i64>>,
        dim_paths: Vec<Query>,
    ) -> Result<FieldData> {
        let counts = counts
            .into_iter()
            .map(|level| {
                level
                    .into_iter()
                    .map(|count| {
                        usize::try_from(count).map_err(|_| {
                            Error::shape_inconsistency(
                                dim_paths
                                    .last()
                                    .map(|q| q.to_string())
                                    .unwrap_or_default(),
                                format!("invalid repeat count {count}"),
                            )
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        FieldData::new(values, counts, dim_paths)
    }

    fn validate(&self) -> Result<()> {
        let name = self
            .dim_paths
            .last()
            .map(|q| q.as_str())
            .unwrap_or_default();
        verify_data!(name, self.dim_paths.len() == self.counts.len() + 1);

        let mut instances = 1usize;
        for level in &self.counts {
            verify_data!(name, level.len() == instances);
            instances = level.iter().try_fold(0usize, |acc, &c| acc.checked_add(c)).ok_or_else(
                || Error::shape_inconsistency(name, "repeat count overflow"),
            )?;
        }

        if self.counts.is_empty() {
            verify_data!(name, self.values.len() <= 1);
        } else {
            verify_data!(name, self.values.len() == instances);
        }
        Ok(())
    }

    pub fn values(&self) -> &Data {
        &self.values
    }

    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn dim_paths(&self) -> &[Query] {
        &self.dim_paths
    }

    /// Number of repeat levels below the message.
    #[inline]
    pub fn depth(&self) -> usize {
        self.counts.len()
    }

    /// Number of dimensions of this field including the per-message one.
    #[inline]
    pub fn dim_count(&self) -> usize {
        self.counts.len() + 1
    }

    /// Maximum repeat count observed at each repeat level.
    pub fn max_counts(&self) -> Vec<usize> {
        self.counts
            .iter()
            .map(|level| level.iter().copied().max().unwrap_or(0))
            .collect()
    }

    pub fn is_string(&self) -> bool {
        self.values.is_string()
    }
}
