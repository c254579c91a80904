//! Conversion of assembled buffers into typed output arrays.

use bufr_array::{ArrayValues, TypedArray};
use bufr_common::{Result, error::Error};
use bufr_format::{Query, TypeInfo, ValueKind};
use bufr_frame::Data;

/// Selects the output kind of a field: the override when given, its native kind
/// otherwise.
pub fn output_kind(
    field_name: &str,
    type_info: &TypeInfo,
    type_override: Option<&str>,
) -> Result<ValueKind> {
    let Some(name) = type_override else {
        return Ok(type_info.native_kind());
    };
    let kind = ValueKind::from_override_name(name).ok_or_else(|| {
        Error::unsupported_type_override(
            field_name,
            name,
            "expected one of int, uint, int32, uint32, int64, uint64, float, double",
        )
    })?;
    if type_info.is_string() {
        return Err(Error::unsupported_type_override(
            field_name,
            name,
            "string fields cannot be converted to numbers",
        ));
    }
    Ok(kind)
}

/// Builds the typed output array of a field.
///
/// Raw missing values (the numeric missing sentinel, empty strings) become the
/// canonical missing value of the output kind.
pub fn build(
    field_name: &str,
    group_by_field_name: Option<&str>,
    type_info: &TypeInfo,
    type_override: Option<&str>,
    buffer: &Data,
    dims: Vec<usize>,
    dim_paths: Vec<Query>,
) -> Result<TypedArray> {
    let kind = output_kind(field_name, type_info, type_override)?;
    let values = ArrayValues::from_data(kind, buffer).ok_or_else(|| {
        Error::shape_inconsistency(
            field_name,
            format!(
                "{} buffer cannot be converted to {kind}",
                if buffer.is_string() { "string" } else { "numeric" }
            ),
        )
    })?;
    TypedArray::try_new(
        field_name,
        group_by_field_name.map(str::to_string),
        dims,
        dim_paths,
        values,
    )
}
