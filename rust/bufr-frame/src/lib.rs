//! Storage of decoded messages ("frames") consumed by the result assembly engine.
//!
//! # Core Concepts
//!
//! ## Frames
//!
//! A [`frame::Frame`] is the lookup table of one decoded message: for every query path
//! the decoder resolved, it holds a [`field::FieldData`] with the raw values of that path
//! in depth-first repeat order together with the repeat counts observed at each nesting
//! level. Frames are immutable once built.
//!
//! ## Raw values
//!
//! Raw values are kept in a [`data::Data`] buffer: double precision numbers or strings.
//! Absent values are represented by [`data::MISSING_VALUE`] (numbers) or the empty string.
//!
//! ## Frame collections
//!
//! [`frame::Frames`] is an ordered arena of frames. Order is significant: the position of
//! a frame in the arena is its row index in every assembled output.

pub mod data;
pub mod field;
pub mod frame;

pub use data::{Data, MISSING_VALUE};
pub use field::FieldData;
pub use frame::{Frame, FrameBuilder, Frames};
