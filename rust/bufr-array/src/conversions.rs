//! Conversion of raw decoded numbers into the numeric output kinds.

use bufr_frame::MISSING_VALUE;
use num_traits::{NumCast, ToPrimitive};

use crate::missing::MissingValue;

/// Converts one raw decoded number into `T`.
///
/// The decoded-missing value, NaN and any value `T` cannot represent (out of range,
/// or overflowing to infinity) become `T`'s missing value. Conversion to an integer
/// kind truncates toward zero.
#[inline]
pub fn convert_number<T>(value: f64) -> T
where
    T: NumCast + MissingValue,
{
    if value == MISSING_VALUE || value.is_nan() {
        return T::missing_value();
    }
    match <T as NumCast>::from(value) {
        Some(converted) if converted.to_f64().is_some_and(f64::is_finite) => converted,
        _ => T::missing_value(),
    }
}

/// Converts a slice of raw decoded numbers into `T`, see [`convert_number`].
pub fn convert_numbers<T>(values: &[f64]) -> Vec<T>
where
    T: NumCast + MissingValue,
{
    values.iter().map(|&value| convert_number(value)).collect()
}
