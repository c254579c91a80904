//! Typed, shaped output arrays produced by the result assembly engine.
//!
//! A [`typed_array::TypedArray`] is a named, row-major, rectangular array of one of the
//! [`bufr_format::ValueKind`] kinds. Dimension 0 indexes rows (messages, or groups when
//! the array was grouped); deeper dimensions index nested repeats.
//!
//! # Missing values
//!
//! Every slot that had no decoded value holds the canonical missing value of the array's
//! kind (see [`missing::MissingValue`]):
//!
//! | kind | missing value |
//! |---|---|
//! | `Int32` | `i32::MAX` |
//! | `UInt32` | `u32::MAX` |
//! | `Int64` | `i64::MAX` |
//! | `UInt64` | `u64::MAX` |
//! | `Float32` | `f32::MAX` |
//! | `Float64` | `f64::MAX` |
//! | `String` | `""` |
//!
//! The values are part of the output contract: exporters rely on them to write fill
//! values.

pub mod conversions;
pub mod missing;
pub mod typed_array;
pub mod values;

pub use missing::MissingValue;
pub use typed_array::TypedArray;
pub use values::ArrayValues;
