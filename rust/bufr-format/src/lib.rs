//! Element metadata and query path definitions shared by the frame storage, the
//! typed output arrays and the result assembly engine.

pub mod query;
pub mod schema;

pub use query::Query;
pub use schema::{TypeInfo, ValueKind};
