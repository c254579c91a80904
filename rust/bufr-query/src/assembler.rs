//! Copying jagged per-frame values into one rectangular buffer.

use bufr_common::{Result, error::Error};
use bufr_frame::{Data, FieldData, Frames};
use tinyvec::TinyVec;

use crate::{
    meta::{ResultData, TargetMetaData, element_count, strides},
    target::Target,
};

/// Inline capacity of the traversal stack; deeper fields spill to the heap.
const INLINE_DEPTH: usize = 8;

/// Pending repeats of one nesting level during the depth-first copy.
#[derive(Debug, Clone, Copy, Default)]
struct Visit {
    /// Dimension iterated by this visit (1-based, dimension 0 being the frame).
    dim: usize,
    /// Number of repeats at this level for the current parent instance.
    count: usize,
    /// Next repeat index to visit.
    next: usize,
    /// Output offset of the parent instance.
    base: usize,
}

/// Assembles the values of `target` from `frames` into a buffer of shape
/// `meta.raw_dims`.
///
/// Every slot starts as the missing value; the values of each frame are then written at
/// their row-major position. Slots beyond a frame's repeat count at any level, and the
/// whole row of a frame marked missing, keep the missing value.
pub fn assemble(target: &Target, meta: &TargetMetaData, frames: &Frames) -> Result<ResultData> {
    let size = element_count(&target.name, &meta.raw_dims)?;
    let mut buffer = Data::missing(meta.is_string(), size);
    let strides = strides(&meta.raw_dims);

    for (frame_idx, frame) in frames.iter().enumerate() {
        let Some(path_idx) = meta.resolved_paths.get(frame_idx).copied().flatten() else {
            continue;
        };
        let path = &target.paths[path_idx];
        let field = frame.get(path).ok_or_else(|| {
            Error::shape_inconsistency(&target.name, format!("path '{path}' vanished"))
        })?;
        copy_frame(
            &target.name,
            field,
            &meta.raw_dims,
            &strides,
            frame_idx * strides[0],
            &mut buffer,
        )?;
    }

    Ok(ResultData {
        buffer,
        dims: meta.raw_dims.clone(),
        raw_dims: meta.raw_dims.clone(),
        dim_paths: meta.dim_paths.clone(),
        row_extents: meta.frame_extents.clone(),
    })
}

/// Copies the values of one frame into the row starting at `row_offset`.
///
/// The traversal walks repeat levels depth first. One cursor per level advances
/// through that level's counts and one input cursor through the values; both move
/// monotonically because counts and values are stored in depth-first order.
fn copy_frame(
    name: &str,
    field: &FieldData,
    dims: &[usize],
    strides: &[usize],
    row_offset: usize,
    buffer: &mut Data,
) -> Result<()> {
    let depth = field.depth();
    let values = field.values();

    if depth == 0 {
        if !values.is_empty() && !buffer.copy_value(row_offset, values, 0) {
            return Err(Error::shape_inconsistency(name, "scalar value out of bounds"));
        }
        return Ok(());
    }

    let counts = field.counts();
    let mut level_cursors: TinyVec<[usize; INLINE_DEPTH]> = TinyVec::new();
    level_cursors.resize(depth, 0);
    let mut input = 0usize;

    let mut stack: TinyVec<[Visit; INLINE_DEPTH]> = TinyVec::new();
    stack.push(Visit {
        dim: 1,
        count: next_count(name, counts, &mut level_cursors, 0, dims)?,
        next: 0,
        base: row_offset,
    });

    while let Some(top) = stack.last_mut() {
        if top.next == top.count {
            stack.pop();
            continue;
        }
        let offset = top.base + top.next * strides[top.dim];
        let dim = top.dim;
        top.next += 1;

        if dim == depth {
            if !buffer.copy_value(offset, values, input) {
                return Err(Error::shape_inconsistency(
                    name,
                    format!("value {input} missing or out of bounds"),
                ));
            }
            input += 1;
        } else {
            let count = next_count(name, counts, &mut level_cursors, dim, dims)?;
            stack.push(Visit {
                dim: dim + 1,
                count,
                next: 0,
                base: offset,
            });
        }
    }
    Ok(())
}

/// Takes the next repeat count of `level` (0-based, counting dimension `level + 1`),
/// verifying it fits the inferred dimension.
fn next_count(
    name: &str,
    counts: &[Vec<usize>],
    level_cursors: &mut [usize],
    level: usize,
    dims: &[usize],
) -> Result<usize> {
    let cursor = level_cursors[level];
    let count = counts
        .get(level)
        .and_then(|level_counts| level_counts.get(cursor))
        .copied()
        .ok_or_else(|| {
            Error::shape_inconsistency(name, format!("missing repeat count {cursor} at level {level}"))
        })?;
    level_cursors[level] += 1;
    if count > dims[level + 1] {
        return Err(Error::shape_inconsistency(
            name,
            format!(
                "repeat count {count} exceeds dimension {} of {}",
                level + 1,
                dims[level + 1]
            ),
        ));
    }
    Ok(count)
}
