//! Canonical missing values of the output kinds.

/// A value type with a reserved missing value.
pub trait MissingValue: Sized {
    /// The reserved value marking an absent or padded slot.
    fn missing_value() -> Self;

    /// Returns `true` if `self` is the reserved missing value.
    fn is_missing_value(&self) -> bool;
}

macro_rules! impl_missing_max {
    ($($t:ty),*) => {
        $(
            impl MissingValue for $t {
                #[inline]
                fn missing_value() -> Self {
                    <$t>::MAX
                }

                #[inline]
                fn is_missing_value(&self) -> bool {
                    *self == <$t>::MAX
                }
            }
        )*
    };
}

impl_missing_max!(i32, u32, i64, u64, f32, f64);

impl MissingValue for String {
    #[inline]
    fn missing_value() -> Self {
        String::new()
    }

    #[inline]
    fn is_missing_value(&self) -> bool {
        self.is_empty()
    }
}
