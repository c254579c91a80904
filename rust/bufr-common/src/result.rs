pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

/// Verifies a shape invariant of decoded data for the given field, failing with
/// `ShapeInconsistency` when the predicate does not hold.
#[macro_export]
macro_rules! verify_data {
    ($field:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_data(result, $field, stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[inline]
pub fn verify_data(predicate: bool, field: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        shape_inconsistency(field, condition)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
pub fn shape_inconsistency(field: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::ShapeInconsistency {
        field: field.to_string(),
        reason: condition.to_string(),
    }
    .into())
}
