//! Projection of assembled data onto a subset of its rows.

use bufr_common::{Result, error::Error};
use bufr_frame::Data;
use bufr_row_set::RowSet;
use tinyvec::TinyVec;

use crate::meta::{ResultData, element_count, shape_of_extents, strides};

const INLINE_DEPTH: usize = 8;

/// Pending sub-blocks of one dimension during the copy.
#[derive(Debug, Clone, Copy, Default)]
struct Visit {
    depth: usize,
    next: usize,
    input: usize,
}

/// Keeps only the rows of `source` selected by `rows`, in increasing row order.
///
/// The outer dimension of the result is the number of selected rows. Inner dimensions
/// are recomputed from the extents of the selected rows only, so they may be smaller
/// than in `source`; the slots dropped that way are padding in every selected row.
pub fn project(field: &str, source: &ResultData, rows: &RowSet) -> Result<ResultData> {
    if rows.span() != source.row_count() {
        return Err(Error::invalid_arg(
            "filter",
            format!(
                "filter over {} rows applied to '{field}' with {} rows",
                rows.span(),
                source.row_count()
            ),
        ));
    }

    let inner_dims = source.dims.len() - 1;
    let mut dims = shape_of_extents(
        rows.count_positions(),
        inner_dims,
        rows.positions().map(|row| &source.row_extents[row]),
    );
    for (dim, &max) in dims[1..].iter_mut().zip(&source.dims[1..]) {
        *dim = (*dim).min(max);
    }

    let buffer = copy_rows(field, &source.buffer, &source.dims, rows, &dims)?;
    log::debug!(
        "'{field}' projected from {:?} to {:?}",
        source.dims,
        dims
    );

    Ok(ResultData {
        buffer,
        dims,
        raw_dims: source.raw_dims.clone(),
        dim_paths: source.dim_paths.clone(),
        row_extents: rows
            .positions()
            .map(|row| source.row_extents[row].clone())
            .collect(),
    })
}

/// Projects `data` in place, see [`project`].
pub fn project_in_place(field: &str, data: &mut ResultData, rows: &RowSet) -> Result<()> {
    *data = project(field, data, rows)?;
    Ok(())
}

/// Copies, for every selected row of `src` (shape `src_dims`), the leading sub-block of
/// shape `dst_dims[1..]` into consecutive rows of a new buffer.
///
/// Depth-first over dimensions with an explicit stack; the input cursor of each pending
/// visit addresses the source block, the output cursor is the length written so far.
fn copy_rows(
    field: &str,
    src: &Data,
    src_dims: &[usize],
    rows: &RowSet,
    dst_dims: &[usize],
) -> Result<Data> {
    let max_depth = src_dims.len();
    let src_strides = strides(src_dims);
    let size = element_count(field, dst_dims)?;
    let mut dst = src.empty_like(size);

    let mut stack: TinyVec<[Visit; INLINE_DEPTH]> = TinyVec::new();
    for row in rows.positions() {
        stack.push(Visit {
            depth: 1,
            next: 0,
            input: row * src_strides[0],
        });

        while let Some(top) = stack.last_mut() {
            if top.depth == max_depth {
                // Single element row.
                dst.extend_from(src, top.input, 1);
                stack.pop();
            } else if top.depth == max_depth - 1 {
                // Innermost dimension: contiguous run.
                dst.extend_from(src, top.input, dst_dims[top.depth]);
                stack.pop();
            } else if top.next == dst_dims[top.depth] {
                stack.pop();
            } else {
                let child = Visit {
                    depth: top.depth + 1,
                    next: 0,
                    input: top.input + top.next * src_strides[top.depth],
                };
                top.next += 1;
                stack.push(child);
            }
        }
    }

    if dst.len() != size {
        return Err(Error::shape_inconsistency(
            field,
            format!("projected {} values into a shape of {size}", dst.len()),
        ));
    }
    Ok(dst)
}
