//! Row filtering policies.
//!
//! A policy inspects already built output arrays and decides which outer rows are
//! valid. The decision is returned as a [`crate::row_filter::RowFilter`] that can be
//! applied to further `get` calls over the same frames, or used directly to slice a set
//! of built arrays.

pub mod bounding;

pub use bounding::BoundingFilter;
