//! Shape metadata and the in-progress assembly buffer.

use bufr_common::{Result, error::Error};
use bufr_format::{Query, TypeInfo};
use bufr_frame::Data;

/// Shape metadata of one target over a frame collection, computed per `get` call.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetMetaData {
    /// Index of the target in the result set.
    pub target_idx: usize,
    pub type_info: TypeInfo,
    /// Working shape of the current operation; starts as `raw_dims`.
    pub dims: Vec<usize>,
    /// Per-dimension maximum count across all frames. `raw_dims[0]` is the frame count.
    pub raw_dims: Vec<usize>,
    /// Shape after filter projection, when a filter was applied.
    pub filtered_dims: Option<Vec<usize>>,
    /// Shape after group-by reshaping, when grouping was applied.
    pub grouped_dims: Option<Vec<usize>>,
    /// `true` for frames in which none of the target's paths is present.
    pub missing_frames: Vec<bool>,
    /// Query path responsible for each dimension.
    pub dim_paths: Vec<Query>,
    /// Index of the candidate path used for each frame.
    pub resolved_paths: Vec<Option<usize>>,
    /// Per-frame maximum repeat count of each inner dimension (zeros for missing frames).
    pub frame_extents: Vec<Vec<usize>>,
}

impl TargetMetaData {
    pub fn dim_count(&self) -> usize {
        self.raw_dims.len()
    }

    pub fn is_string(&self) -> bool {
        self.type_info.is_string()
    }

    /// Number of frames in which the target is present.
    pub fn present_count(&self) -> usize {
        self.missing_frames.iter().filter(|&&missing| !missing).count()
    }
}

/// A flat row-major value buffer with its shape.
///
/// Dimension 0 indexes rows: frames after assembly and projection by a frame filter,
/// groups after group-by. `row_extents[r]` holds, for every inner dimension, the
/// largest count actually observed in row `r`; slots beyond it are padding.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultData {
    pub buffer: Data,
    pub dims: Vec<usize>,
    pub raw_dims: Vec<usize>,
    pub dim_paths: Vec<Query>,
    pub row_extents: Vec<Vec<usize>>,
}

impl ResultData {
    pub fn row_count(&self) -> usize {
        self.dims[0]
    }

    /// Number of elements of one row.
    pub fn row_len(&self) -> usize {
        self.dims[1..].iter().product()
    }
}

/// Product of `dims`, failing on overflow.
pub(crate) fn element_count(field: &str, dims: &[usize]) -> Result<usize> {
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| {
            Error::shape_inconsistency(field, format!("element count of {dims:?} overflows"))
        })
}

/// Row-major strides: `strides[d]` is the number of elements spanned by one step along
/// dimension `d`.
pub(crate) fn strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; dims.len()];
    for d in (0..dims.len().saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * dims[d + 1];
    }
    strides
}

/// Shape covering only the given row extents: `[rows, max extent per inner dim]`, with
/// every inner dimension at least one. A dimension no row repeats along keeps one slot
/// of missing padding.
pub(crate) fn shape_of_extents<'a>(
    rows: usize,
    inner_dims: usize,
    extents: impl Iterator<Item = &'a Vec<usize>>,
) -> Vec<usize> {
    let mut dims = vec![1usize; inner_dims + 1];
    dims[0] = rows;
    for extent in extents {
        for (dim, &count) in dims[1..].iter_mut().zip(extent.iter()) {
            *dim = (*dim).max(count);
        }
    }
    dims
}
