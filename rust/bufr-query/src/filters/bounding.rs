//! Selection of rows whose values lie within bounds.

use ahash::AHashMap;
use bufr_array::{MissingValue, TypedArray};
use bufr_common::{Result, error::Error};
use bufr_format::ValueKind;
use bufr_row_set::RowSetBuilder;
use serde::{Deserialize, Serialize};

use crate::row_filter::RowFilter;

/// Keeps the rows of `variable` whose every value lies within the bounds.
///
/// With both bounds a row must satisfy both; with a single bound, that bound. Missing
/// values are compared as the missing value of the array's kind (its `MAX`), so any row
/// holding one fails a finite upper bound and passes a lower bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingFilter {
    pub variable: String,
    #[serde(default)]
    pub lower_bound: Option<f64>,
    #[serde(default)]
    pub upper_bound: Option<f64>,
}

impl BoundingFilter {
    pub fn new(
        variable: impl Into<String>,
        lower_bound: Option<f64>,
        upper_bound: Option<f64>,
    ) -> Result<BoundingFilter> {
        let filter = BoundingFilter {
            variable: variable.into(),
            lower_bound,
            upper_bound,
        };
        filter.validate()?;
        Ok(filter)
    }

    /// Checks that at least one bound is set and that the bounds are ordered.
    pub fn validate(&self) -> Result<()> {
        match (self.lower_bound, self.upper_bound) {
            (None, None) => Err(Error::invalid_arg(
                "bounding filter",
                format!(
                    "filter on '{}' needs a lowerBound, an upperBound or both",
                    self.variable
                ),
            )),
            (Some(lower), Some(upper)) if upper < lower => Err(Error::invalid_arg(
                "bounding filter",
                format!(
                    "upperBound {upper} of the filter on '{}' is below lowerBound {lower}",
                    self.variable
                ),
            )),
            _ => Ok(()),
        }
    }

    fn accepts(&self, value: f64) -> bool {
        self.lower_bound.is_none_or(|lower| value >= lower)
            && self.upper_bound.is_none_or(|upper| value <= upper)
    }

    /// Computes the rows of `array` that pass the filter.
    ///
    /// The resulting filter is over frames, or over groups when `array` was grouped.
    pub fn compute(&self, array: &TypedArray) -> Result<RowFilter> {
        if array.kind().is_string() {
            return Err(Error::invalid_arg(
                "bounding filter",
                format!("'{}' holds strings, expected numbers", array.field_name()),
            ));
        }

        let missing = missing_as_f64(array.kind());
        let mut builder = RowSetBuilder::new();
        for row in 0..array.row_count() {
            if array
                .row_f64(row)
                .all(|value| self.accepts(value.unwrap_or(missing)))
            {
                builder.push_position(row);
            }
        }
        let rows = builder.build(array.row_count());
        log::debug!(
            "bounding filter on '{}' keeps {} of {} rows",
            self.variable,
            rows.count_positions(),
            rows.span()
        );

        Ok(RowFilter {
            group_by: array.group_by_field_name().map(str::to_string),
            rows,
        })
    }

    /// Filters every array of `arrays` by the rows of `variable` that pass.
    ///
    /// Arrays are only sliced when at least one row was dropped. Returns the computed
    /// filter so it can be applied to later extractions.
    pub fn apply(&self, arrays: &mut AHashMap<String, TypedArray>) -> Result<RowFilter> {
        let array = arrays.get(&self.variable).ok_or_else(|| {
            Error::invalid_arg(
                "bounding filter",
                format!("unknown variable '{}'", self.variable),
            )
        })?;
        let filter = self.compute(array)?;

        if !filter.is_full() {
            for array in arrays.values_mut() {
                *array = array.slice_rows(filter.rows.as_slice())?;
            }
        }
        Ok(filter)
    }
}

fn missing_as_f64(kind: ValueKind) -> f64 {
    match kind {
        ValueKind::Int32 => i32::missing_value() as f64,
        ValueKind::UInt32 => u32::missing_value() as f64,
        ValueKind::Int64 => i64::missing_value() as f64,
        ValueKind::UInt64 => u64::missing_value() as f64,
        ValueKind::Float32 => f32::missing_value() as f64,
        ValueKind::Float64 | ValueKind::String => f64::missing_value(),
    }
}

#[cfg(test)]
mod tests {
    use bufr_array::ArrayValues;
    use bufr_format::Query;

    use super::*;

    fn floats(name: &str, dims: Vec<usize>, values: Vec<f64>) -> TypedArray {
        let dim_paths = (0..dims.len()).map(|_| Query::root()).collect();
        TypedArray::try_new(name, None, dims, dim_paths, ArrayValues::Float64(values)).unwrap()
    }

    #[test]
    fn test_bounds_validation() {
        assert!(BoundingFilter::new("t", None, None).is_err());
        assert!(BoundingFilter::new("t", Some(2.0), Some(1.0)).is_err());
        assert!(BoundingFilter::new("t", Some(1.0), Some(1.0)).is_ok());
        assert!(BoundingFilter::new("t", None, Some(1.0)).is_ok());
    }

    #[test]
    fn test_compute_both_bounds() {
        let array = floats("t", vec![4, 2], vec![
            1.0, 2.0, // kept
            1.0, 11.0, // above
            -1.0, 5.0, // below
            f64::MAX, 3.0, // missing exceeds the upper bound
        ]);
        let filter = BoundingFilter::new("t", Some(0.0), Some(10.0))
            .unwrap()
            .compute(&array)
            .unwrap();
        assert_eq!(filter.group_by, None);
        assert_eq!(filter.rows.as_slice(), &[0]);
    }

    #[test]
    fn test_missing_compared_as_kind_max() {
        let array = TypedArray::try_new(
            "t",
            None,
            vec![3],
            vec![Query::root()],
            ArrayValues::Float32(vec![1.0, f32::MAX, 20.0]),
        )
        .unwrap();
        let upper = BoundingFilter::new("t", None, Some(10.0))
            .unwrap()
            .compute(&array)
            .unwrap();
        assert_eq!(upper.rows.as_slice(), &[0]);

        let lower = BoundingFilter::new("t", Some(5.0), None)
            .unwrap()
            .compute(&array)
            .unwrap();
        assert_eq!(lower.rows.as_slice(), &[1, 2]);

        let ints = TypedArray::try_new(
            "n",
            None,
            vec![2],
            vec![Query::root()],
            ArrayValues::Int32(vec![i32::MAX, 4]),
        )
        .unwrap();
        let filter = BoundingFilter::new("n", None, Some(f64::from(i32::MAX)))
            .unwrap()
            .compute(&ints)
            .unwrap();
        assert_eq!(filter.rows.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_compute_single_bound() {
        let array = floats("t", vec![3], vec![1.0, 5.0, 9.0]);
        let filter = BoundingFilter::new("t", Some(5.0), None)
            .unwrap()
            .compute(&array)
            .unwrap();
        assert_eq!(filter.rows.as_slice(), &[1, 2]);
        let filter = BoundingFilter::new("t", None, Some(5.0))
            .unwrap()
            .compute(&array)
            .unwrap();
        assert_eq!(filter.rows.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_compute_rejects_strings() {
        let array = TypedArray::try_new(
            "name",
            None,
            vec![1],
            vec![Query::root()],
            ArrayValues::String(vec!["A".to_string()]),
        )
        .unwrap();
        assert!(
            BoundingFilter::new("name", Some(0.0), None)
                .unwrap()
                .compute(&array)
                .is_err()
        );
    }

    #[test]
    fn test_apply_slices_all_arrays() {
        let mut arrays = AHashMap::new();
        arrays.insert("t".to_string(), floats("t", vec![3], vec![1.0, 50.0, 2.0]));
        arrays.insert(
            "p".to_string(),
            floats("p", vec![3, 2], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        );
        let filter = BoundingFilter::new("t", None, Some(10.0)).unwrap();
        let rows = filter.apply(&mut arrays).unwrap();
        assert_eq!(rows.rows.as_slice(), &[0, 2]);
        assert_eq!(arrays["t"].values().as_f64().unwrap(), &[1.0, 2.0]);
        assert_eq!(arrays["p"].dims(), &[2, 2]);
        assert_eq!(arrays["p"].values().as_f64().unwrap(), &[1.0, 2.0, 5.0, 6.0]);

        let missing = BoundingFilter::new("nope", None, Some(1.0)).unwrap();
        assert!(missing.apply(&mut arrays).is_err());
    }
}
