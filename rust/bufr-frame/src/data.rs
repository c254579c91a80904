//! Raw value buffers.

/// Decoded-missing value of numeric elements.
///
/// Slots of an assembled buffer that have no corresponding decoded value are filled with
/// this value; the typed output builder later maps it to the output kind's missing value.
pub const MISSING_VALUE: f64 = 10.0e10;

/// A flat buffer of raw values, either numbers or strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Numbers(Vec<f64>),
    Strings(Vec<String>),
}

impl Data {
    /// Creates a buffer of `len` missing values.
    pub fn missing(is_string: bool, len: usize) -> Data {
        if is_string {
            Data::Strings(vec![String::new(); len])
        } else {
            Data::Numbers(vec![MISSING_VALUE; len])
        }
    }

    /// Creates an empty buffer of the same variant as `self` with room for `capacity`
    /// values.
    pub fn empty_like(&self, capacity: usize) -> Data {
        match self {
            Data::Numbers(_) => Data::Numbers(Vec::with_capacity(capacity)),
            Data::Strings(_) => Data::Strings(Vec::with_capacity(capacity)),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Data::Numbers(values) => values.len(),
            Data::Strings(values) => values.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Data::Strings(_))
    }

    /// Returns `true` if the value at `index` is the missing value.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn is_missing(&self, index: usize) -> bool {
        match self {
            Data::Numbers(values) => values[index] == MISSING_VALUE,
            Data::Strings(values) => values[index].is_empty(),
        }
    }

    /// Copies the value at `src_index` of `src` into slot `dst_index` of `self`.
    ///
    /// Returns `false` without copying if the buffers hold different variants or
    /// either index is out of bounds.
    pub fn copy_value(&mut self, dst_index: usize, src: &Data, src_index: usize) -> bool {
        match (self, src) {
            (Data::Numbers(dst), Data::Numbers(src)) => {
                match (dst.get_mut(dst_index), src.get(src_index)) {
                    (Some(d), Some(s)) => {
                        *d = *s;
                        true
                    }
                    _ => false,
                }
            }
            (Data::Strings(dst), Data::Strings(src)) => {
                match (dst.get_mut(dst_index), src.get(src_index)) {
                    (Some(d), Some(s)) => {
                        d.clone_from(s);
                        true
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Appends `len` values of `src` starting at `src_index`.
    ///
    /// # Panics
    ///
    /// Panics if the variants differ or the range is out of bounds.
    pub fn extend_from(&mut self, src: &Data, src_index: usize, len: usize) {
        match (self, src) {
            (Data::Numbers(dst), Data::Numbers(src)) => {
                dst.extend_from_slice(&src[src_index..src_index + len])
            }
            (Data::Strings(dst), Data::Strings(src)) => {
                dst.extend_from_slice(&src[src_index..src_index + len])
            }
            _ => panic!("Data::extend_from: mismatched buffer variants"),
        }
    }

    /// Appends `len` missing values.
    pub fn extend_missing(&mut self, len: usize) {
        match self {
            Data::Numbers(values) => values.resize(values.len() + len, MISSING_VALUE),
            Data::Strings(values) => values.resize(values.len() + len, String::new()),
        }
    }

    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            Data::Numbers(values) => Some(values),
            Data::Strings(_) => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Data::Numbers(_) => None,
            Data::Strings(values) => Some(values),
        }
    }
}

impl From<Vec<f64>> for Data {
    fn from(values: Vec<f64>) -> Self {
        Data::Numbers(values)
    }
}

impl From<Vec<String>> for Data {
    fn from(values: Vec<String>) -> Self {
        Data::Strings(values)
    }
}

impl From<Vec<&str>> for Data {
    fn from(values: Vec<&str>) -> Self {
        Data::Strings(values.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_buffers() {
        let numbers = Data::missing(false, 3);
        assert_eq!(numbers.len(), 3);
        assert!((0..3).all(|i| numbers.is_missing(i)));

        let strings = Data::missing(true, 2);
        assert!(strings.is_string());
        assert_eq!(strings.as_strings().unwrap(), &["", ""]);
    }

    #[test]
    fn test_copy_value() {
        let src = Data::from(vec![1.0, 2.0]);
        let mut dst = Data::missing(false, 3);
        assert!(dst.copy_value(2, &src, 1));
        assert_eq!(dst.as_numbers().unwrap(), &[MISSING_VALUE, MISSING_VALUE, 2.0]);

        assert!(!dst.copy_value(3, &src, 0));
        assert!(!dst.copy_value(0, &src, 2));
        assert!(!dst.copy_value(0, &Data::from(vec!["a"]), 0));
    }

    #[test]
    fn test_extend() {
        let src = Data::from(vec!["a", "b", "c"]);
        let mut dst = src.empty_like(4);
        dst.extend_from(&src, 1, 2);
        dst.extend_missing(2);
        assert_eq!(dst.as_strings().unwrap(), &["b", "c", "", ""]);
    }
}
