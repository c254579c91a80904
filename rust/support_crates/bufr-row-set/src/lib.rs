pub mod row_set;
pub mod row_set_builder;
#[cfg(test)]
mod tests;

pub use row_set::RowSet;
pub use row_set_builder::RowSetBuilder;
