//! Kind-tagged value storage of output arrays.

use bufr_format::ValueKind;
use bufr_frame::Data;

use crate::{
    conversions::convert_numbers,
    missing::MissingValue,
};

/// The values of an output array, one variant per [`ValueKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValues {
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Int64(Vec<i64>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    String(Vec<String>),
}

/// Applies `$body` to the inner vector of any variant.
macro_rules! with_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            ArrayValues::Int32($v) => $body,
            ArrayValues::UInt32($v) => $body,
            ArrayValues::Int64($v) => $body,
            ArrayValues::UInt64($v) => $body,
            ArrayValues::Float32($v) => $body,
            ArrayValues::Float64($v) => $body,
            ArrayValues::String($v) => $body,
        }
    };
}

/// Applies `$body` to the inner vector of any variant, wrapping the result in the
/// same variant.
macro_rules! map_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            ArrayValues::Int32($v) => ArrayValues::Int32($body),
            ArrayValues::UInt32($v) => ArrayValues::UInt32($body),
            ArrayValues::Int64($v) => ArrayValues::Int64($body),
            ArrayValues::UInt64($v) => ArrayValues::UInt64($body),
            ArrayValues::Float32($v) => ArrayValues::Float32($body),
            ArrayValues::Float64($v) => ArrayValues::Float64($body),
            ArrayValues::String($v) => ArrayValues::String($body),
        }
    };
}

impl ArrayValues {
    /// Creates `len` missing values of the given kind.
    pub fn missing(kind: ValueKind, len: usize) -> ArrayValues {
        match kind {
            ValueKind::Int32 => ArrayValues::Int32(vec![i32::missing_value(); len]),
            ValueKind::UInt32 => ArrayValues::UInt32(vec![u32::missing_value(); len]),
            ValueKind::Int64 => ArrayValues::Int64(vec![i64::missing_value(); len]),
            ValueKind::UInt64 => ArrayValues::UInt64(vec![u64::missing_value(); len]),
            ValueKind::Float32 => ArrayValues::Float32(vec![f32::missing_value(); len]),
            ValueKind::Float64 => ArrayValues::Float64(vec![f64::missing_value(); len]),
            ValueKind::String => ArrayValues::String(vec![String::missing_value(); len]),
        }
    }

    /// Converts a raw buffer into values of `kind`.
    ///
    /// Numbers convert to any numeric kind (see [`crate::conversions`]); strings only
    /// to `String`. Returns `None` for any other combination.
    pub fn from_data(kind: ValueKind, data: &Data) -> Option<ArrayValues> {
        let values = match (kind, data) {
            (ValueKind::String, Data::Strings(values)) => ArrayValues::String(values.clone()),
            (ValueKind::String, Data::Numbers(_)) | (_, Data::Strings(_)) => return None,
            (ValueKind::Int32, Data::Numbers(values)) => {
                ArrayValues::Int32(convert_numbers(values))
            }
            (ValueKind::UInt32, Data::Numbers(values)) => {
                ArrayValues::UInt32(convert_numbers(values))
            }
            (ValueKind::Int64, Data::Numbers(values)) => {
                ArrayValues::Int64(convert_numbers(values))
            }
            (ValueKind::UInt64, Data::Numbers(values)) => {
                ArrayValues::UInt64(convert_numbers(values))
            }
            (ValueKind::Float32, Data::Numbers(values)) => {
                ArrayValues::Float32(convert_numbers(values))
            }
            (ValueKind::Float64, Data::Numbers(values)) => {
                ArrayValues::Float64(convert_numbers(values))
            }
        };
        Some(values)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            ArrayValues::Int32(_) => ValueKind::Int32,
            ArrayValues::UInt32(_) => ValueKind::UInt32,
            ArrayValues::Int64(_) => ValueKind::Int64,
            ArrayValues::UInt64(_) => ValueKind::UInt64,
            ArrayValues::Float32(_) => ValueKind::Float32,
            ArrayValues::Float64(_) => ValueKind::Float64,
            ArrayValues::String(_) => ValueKind::String,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the value at `index` is the kind's missing value.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn is_missing(&self, index: usize) -> bool {
        with_values!(self, v => v[index].is_missing_value())
    }

    /// Returns the value at `index` as `f64`, or `None` for strings and missing values.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        if self.is_missing(index) {
            return None;
        }
        match self {
            ArrayValues::Int32(v) => Some(v[index] as f64),
            ArrayValues::UInt32(v) => Some(v[index] as f64),
            ArrayValues::Int64(v) => Some(v[index] as f64),
            ArrayValues::UInt64(v) => Some(v[index] as f64),
            ArrayValues::Float32(v) => Some(v[index] as f64),
            ArrayValues::Float64(v) => Some(v[index]),
            ArrayValues::String(_) => None,
        }
    }

    /// Gathers the given blocks of `block_len` consecutive values, in order.
    ///
    /// # Panics
    ///
    /// Panics if a block lies outside the values.
    pub fn take_blocks(&self, block_len: usize, blocks: &[usize]) -> ArrayValues {
        map_values!(self, v => {
            let mut out = Vec::with_capacity(block_len * blocks.len());
            for &block in blocks {
                let start = block * block_len;
                out.extend_from_slice(&v[start..start + block_len]);
            }
            out
        })
    }

    pub fn as_i32(&self) -> Option<&[i32]> {
        match self {
            ArrayValues::Int32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<&[u32]> {
        match self {
            ArrayValues::UInt32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<&[i64]> {
        match self {
            ArrayValues::Int64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<&[u64]> {
        match self {
            ArrayValues::UInt64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            ArrayValues::Float32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            ArrayValues::Float64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            ArrayValues::String(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use bufr_frame::MISSING_VALUE;

    use super::*;

    #[test]
    fn test_from_data_dispatch() {
        let numbers = Data::from(vec![1.0, MISSING_VALUE, 3.7]);
        let values = ArrayValues::from_data(ValueKind::Int32, &numbers).unwrap();
        assert_eq!(values.as_i32(), Some(&[1, i32::MAX, 3][..]));
        assert!(values.is_missing(1));
        assert_eq!(values.get_f64(2), Some(3.0));
        assert_eq!(values.get_f64(1), None);

        let values = ArrayValues::from_data(ValueKind::Float64, &numbers).unwrap();
        assert_eq!(values.kind(), ValueKind::Float64);
        assert_eq!(values.get_f64(2), Some(3.7));

        let strings = Data::from(vec!["KWBC", ""]);
        let values = ArrayValues::from_data(ValueKind::String, &strings).unwrap();
        assert!(values.is_missing(1));
        assert_eq!(values.get_f64(0), None);

        assert!(ArrayValues::from_data(ValueKind::Int32, &strings).is_none());
        assert!(ArrayValues::from_data(ValueKind::String, &numbers).is_none());
    }

    #[test]
    fn test_take_blocks() {
        let values = ArrayValues::UInt32(vec![0, 1, 10, 11, 20, 21]);
        let taken = values.take_blocks(2, &[2, 0]);
        assert_eq!(taken.as_u32(), Some(&[20, 21, 0, 1][..]));
        assert!(values.take_blocks(2, &[]).is_empty());
    }

    #[test]
    fn test_missing_of_kind() {
        let values = ArrayValues::missing(ValueKind::Float32, 2);
        assert_eq!(values.as_f32(), Some(&[f32::MAX, f32::MAX][..]));
        assert_eq!(ArrayValues::missing(ValueKind::String, 1).len(), 1);
    }
}
