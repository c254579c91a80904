//! Reshaping assembled data by the distinct values of a grouping key.
//!
//! The grouping key is itself assembled like any other field, giving one key value per
//! key cell (a position in the key's shape). A key with `m` dimensions partitions the
//! target's first `m` dimensions into cells; each cell owns the target's slab of the
//! remaining inner dimensions. Grouping collects the slabs of all cells sharing a key
//! value:
//!
//! ```text
//! target dims [F, d1, .., dk], key dims [F, g1, .., g(m-1)]
//!   => grouped dims [G, C, dm, .., dk]
//! ```
//!
//! where `G` is the number of distinct key values (in order of first appearance) and
//! `C` the largest number of cells of any group. Groups with fewer cells are padded with
//! missing slabs. Cells whose key is missing are padding and are skipped.

use ahash::AHashMap;
use bufr_common::{Result, error::Error};
use bufr_format::Query;
use bufr_frame::Data;
use ordered_float::OrderedFloat;

use crate::meta::{ResultData, TargetMetaData, element_count};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKey {
    Number(OrderedFloat<f64>),
    Text(String),
}

impl GroupKey {
    fn at(data: &Data, index: usize) -> GroupKey {
        match data {
            Data::Numbers(values) => GroupKey::Number(OrderedFloat(values[index])),
            Data::Strings(values) => GroupKey::Text(values[index].clone()),
        }
    }
}

/// Verifies that `group_by` can group `field`.
///
/// The key must not have more dimensions than the target, and every inner dimension
/// the two share must be produced by the same query path. A key that is finer grained
/// than the target (or repeats along a different sequence) cannot group it.
pub fn validate_group_by(
    field: &str,
    group_by: &str,
    target: &TargetMetaData,
    key: &TargetMetaData,
) -> Result<()> {
    if key.dim_count() > target.dim_count() {
        return Err(Error::invalid_group_by(
            field,
            group_by,
            format!(
                "group_by field has {} dimensions, the field only {}",
                key.dim_count(),
                target.dim_count()
            ),
        ));
    }
    for d in 1..key.dim_count() {
        if key.dim_paths[d] != target.dim_paths[d] {
            return Err(Error::invalid_group_by(
                field,
                group_by,
                format!(
                    "dimension {d} repeats along '{}' in the group_by field but along '{}' \
                     in the field",
                    key.dim_paths[d], target.dim_paths[d]
                ),
            ));
        }
    }
    Ok(())
}

/// Reshapes `result` in place by the values of `key`.
///
/// `key` must be the assembled (and identically filtered) data of the grouping field,
/// already validated with [`validate_group_by`]. `key_path` becomes the path of the new
/// group dimension.
pub fn apply_group_by(
    field: &str,
    result: &mut ResultData,
    meta: &mut TargetMetaData,
    key: &ResultData,
    key_path: &Query,
) -> Result<()> {
    let key_dim_count = key.dims.len();
    if key.dims[0] != result.dims[0] {
        return Err(Error::shape_inconsistency(
            field,
            format!(
                "group_by key has {} rows, the field {}",
                key.dims[0], result.dims[0]
            ),
        ));
    }

    let slab_dims = &result.dims[key_dim_count..];
    let slab_len = element_count(field, slab_dims)?;

    let mut group_index: AHashMap<GroupKey, usize> = AHashMap::new();
    // Per group: (slab index, source row) of each member cell.
    let mut groups: Vec<Vec<(usize, usize)>> = Vec::new();
    let mut cell = vec![0usize; key_dim_count];

    for key_idx in 0..key.buffer.len() {
        if key.buffer.is_missing(key_idx) {
            continue;
        }
        unravel(key_idx, &key.dims, &mut cell);
        let Some(slab) = ravel(&cell, &result.dims[..key_dim_count]) else {
            continue;
        };

        let group = *group_index
            .entry(GroupKey::at(&key.buffer, key_idx))
            .or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
        groups[group].push((slab, cell[0]));
    }

    let group_count = groups.len();
    let max_cells = groups.iter().map(Vec::len).max().unwrap_or(0).max(1);

    let mut grouped_dims = Vec::with_capacity(slab_dims.len() + 2);
    grouped_dims.push(group_count);
    grouped_dims.push(max_cells);
    grouped_dims.extend_from_slice(slab_dims);
    let size = element_count(field, &grouped_dims)?;

    let mut buffer = result.buffer.empty_like(size);
    let mut row_extents = Vec::with_capacity(group_count);
    for members in &groups {
        let mut extent = vec![0usize; slab_dims.len() + 1];
        extent[0] = members.len();
        for &(slab, row) in members {
            buffer.extend_from(&result.buffer, slab * slab_len, slab_len);
            let source_extent = &result.row_extents[row][key_dim_count - 1..];
            for (e, &s) in extent[1..].iter_mut().zip(source_extent) {
                *e = (*e).max(s);
            }
        }
        buffer.extend_missing((max_cells - members.len()) * slab_len);
        row_extents.push(extent);
    }

    let mut dim_paths = Vec::with_capacity(grouped_dims.len());
    dim_paths.push(key_path.clone());
    dim_paths.push(key.dim_paths[key_dim_count - 1].clone());
    dim_paths.extend_from_slice(&result.dim_paths[key_dim_count..]);

    log::debug!(
        "'{field}' grouped into {group_count} groups of up to {max_cells} cells: {grouped_dims:?}"
    );

    result.buffer = buffer;
    result.dims = grouped_dims.clone();
    result.dim_paths = dim_paths;
    result.row_extents = row_extents;
    meta.dims = grouped_dims.clone();
    meta.grouped_dims = Some(grouped_dims);
    Ok(())
}

/// Row-major multi-index of flat `index` within `dims`.
fn unravel(mut index: usize, dims: &[usize], out: &mut [usize]) {
    for d in (0..dims.len()).rev() {
        out[d] = index % dims[d];
        index /= dims[d];
    }
}

/// Flat row-major index of `cell` within `dims`, `None` if the cell lies outside.
fn ravel(cell: &[usize], dims: &[usize]) -> Option<usize> {
    let mut index = 0usize;
    for (&i, &d) in cell.iter().zip(dims) {
        if i >= d {
            return None;
        }
        index = index * d + i;
    }
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unravel_ravel() {
        let dims = [3, 2, 4];
        let mut cell = [0usize; 3];
        for index in 0..24 {
            unravel(index, &dims, &mut cell);
            assert_eq!(ravel(&cell, &dims), Some(index));
        }
        assert_eq!(ravel(&[1, 2], &[3, 2]), None);
        assert_eq!(ravel(&[2, 1], &[3, 3]), Some(7));
    }

    #[test]
    fn test_group_keys() {
        let numbers = Data::from(vec![1.0, 1.0, 2.0]);
        assert_eq!(GroupKey::at(&numbers, 0), GroupKey::at(&numbers, 1));
        assert_ne!(GroupKey::at(&numbers, 0), GroupKey::at(&numbers, 2));
        let strings = Data::from(vec!["A", "B"]);
        assert_eq!(GroupKey::at(&strings, 1), GroupKey::Text("B".to_string()));
    }
}
