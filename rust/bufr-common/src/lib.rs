//! Core definitions (error type, result alias and verification macros), relied upon
//! by all bufr-* crates.

pub mod error;
pub mod result;

pub use result::Result;
