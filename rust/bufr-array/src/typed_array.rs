//! Named, shaped output arrays.

use bufr_common::{Result, error::Error, verify_arg};
use bufr_format::{Query, ValueKind};

use crate::values::ArrayValues;

/// A named, typed, rectangular array in row-major order.
///
/// `dims[0]` is the number of rows; the remaining dimensions are nested repeats.
/// `dim_paths[i]` is the query path responsible for dimension `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedArray {
    field_name: String,
    group_by_field_name: Option<String>,
    dims: Vec<usize>,
    dim_paths: Vec<Query>,
    values: ArrayValues,
}

impl TypedArray {
    /// Creates an array, verifying that the value count matches the shape.
    pub fn try_new(
        field_name: impl Into<String>,
        group_by_field_name: Option<String>,
        dims: Vec<usize>,
        dim_paths: Vec<Query>,
        values: ArrayValues,
    ) -> Result<TypedArray> {
        verify_arg!(dims, !dims.is_empty());
        verify_arg!(dim_paths, dim_paths.len() == dims.len());
        let len = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| Error::invalid_arg("dims", "element count overflow"))?;
        verify_arg!(values, values.len() == len);
        Ok(TypedArray {
            field_name: field_name.into(),
            group_by_field_name,
            dims,
            dim_paths,
            values,
        })
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn group_by_field_name(&self) -> Option<&str> {
        self.group_by_field_name.as_deref()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn dim_paths(&self) -> &[Query] {
        &self.dim_paths
    }

    pub fn values(&self) -> &ArrayValues {
        &self.values
    }

    pub fn kind(&self) -> ValueKind {
        self.values.kind()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of rows (extent of dimension 0).
    pub fn row_count(&self) -> usize {
        self.dims[0]
    }

    /// Number of elements per row.
    pub fn row_len(&self) -> usize {
        self.dims[1..].iter().product()
    }

    pub fn is_missing(&self, index: usize) -> bool {
        self.values.is_missing(index)
    }

    /// Values of one row as `f64`, `None` for missing slots.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row_f64(&self, row: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        assert!(row < self.row_count());
        let row_len = self.row_len();
        (row * row_len..(row + 1) * row_len).map(move |i| self.values.get_f64(i))
    }

    /// Keeps only the given rows, in the given order.
    pub fn slice_rows(&self, rows: &[usize]) -> Result<TypedArray> {
        if let Some(&row) = rows.iter().find(|&&row| row >= self.row_count()) {
            return Err(Error::invalid_arg(
                "rows",
                format!(
                    "row {row} out of range for '{}' with {} rows",
                    self.field_name,
                    self.row_count()
                ),
            ));
        }
        let mut dims = self.dims.clone();
        dims[0] = rows.len();
        Ok(TypedArray {
            field_name: self.field_name.clone(),
            group_by_field_name: self.group_by_field_name.clone(),
            dims,
            dim_paths: self.dim_paths.clone(),
            values: self.values.take_blocks(self.row_len(), rows),
        })
    }
}
