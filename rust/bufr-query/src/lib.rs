//! Result assembly: turning jagged per-message values into typed rectangular arrays.
//!
//! # Overview
//!
//! A [`result_set::ResultSet`] pairs a list of requested fields ([`target::Target`]) with
//! an ordered collection of decoded frames. Extracting a field goes through these stages:
//!
//! 1. [`analyzer`]: infers the field's rectangular shape. Dimension 0 is the frame count;
//!    each deeper dimension is the largest repeat count seen at that nesting level.
//! 2. [`assembler`]: copies every frame's values into one flat row-major buffer of that
//!    shape, padding short repeats and absent frames with the missing value.
//! 3. [`projector`]: keeps only the rows of a [`row_filter::RowFilter`], when one is given.
//! 4. [`group_by`]: regroups the buffer by the distinct values of another field.
//! 5. [`output`]: converts the buffer into a [`bufr_array::TypedArray`] of the field's
//!    native kind or of an explicitly requested one.
//!
//! Each `get` is independent of any other: nothing is cached and frames are only read.
//! To keep several fields row aligned under filtering, compute the filter once (for
//! instance with [`filters::BoundingFilter`]) and pass it to every `get`.

pub mod analyzer;
pub mod assembler;
pub mod config;
pub mod filters;
pub mod group_by;
pub mod meta;
pub mod options;
pub mod output;
pub mod projector;
pub mod result_set;
pub mod row_filter;
pub mod target;

#[cfg(test)]
mod tests;

pub use config::QuerySetConfig;
pub use options::AssemblyOptions;
pub use result_set::{GetOptions, ResultSet};
pub use row_filter::RowFilter;
pub use target::Target;
