//! Test utilities for the result assembly engine.
//!
//! This crate provides:
//! - Fixture builders for small hand-written frame collections
//! - Seeded random generation of jagged frame collections together with the values
//!   they are expected to yield
//!
//! It is intended for use from the workspace's test suites only.

pub mod data_gen;
pub mod fixtures;
