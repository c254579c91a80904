//! Shape inference over jagged frames.

use bufr_common::{Result, error::Error};
use bufr_format::Query;
use bufr_frame::Frames;
use itertools::Itertools;

use crate::{meta::TargetMetaData, options::AssemblyOptions, target::Target};

/// Computes the shape metadata of `target` over `frames`.
///
/// For every frame the first candidate path present is resolved; frames without any
/// are marked missing and contribute zero to every inner dimension. `raw_dims[0]` is
/// always the number of frames. Each inner dimension is the maximum repeat count seen
/// at that depth across all frames, clamped to at least one, and its dim path is taken
/// from the frame that first established the maximum. When no frame repeats at some
/// depth, the single slot kept by the clamp never holds a value and is always missing
/// padding.
///
/// Fails with `UnknownField` if there is at least one frame and none of them holds any
/// of the target's paths, unless the target is optional.
pub fn analyze(
    target_idx: usize,
    target: &Target,
    frames: &Frames,
    options: &AssemblyOptions,
) -> Result<TargetMetaData> {
    let frame_count = frames.len();
    let mut resolved_paths = Vec::with_capacity(frame_count);
    let mut missing_frames = Vec::with_capacity(frame_count);
    let mut frame_extents = Vec::with_capacity(frame_count);

    // Established by the first frame holding the target.
    let mut shape: Option<(Vec<usize>, Vec<Query>)> = None;

    for (frame_idx, frame) in frames.iter().enumerate() {
        let Some(path_idx) = target.resolve(frame) else {
            log::trace!("'{}': frame {frame_idx} has none of its paths", target.name);
            resolved_paths.push(None);
            missing_frames.push(true);
            frame_extents.push(Vec::new());
            continue;
        };

        let path = &target.paths[path_idx];
        let field = frame.get(path).ok_or_else(|| {
            Error::shape_inconsistency(&target.name, format!("path '{path}' vanished"))
        })?;
        log::trace!("'{}': frame {frame_idx} resolved to '{path}'", target.name);

        if field.is_string() != target.type_info.is_string() {
            return Err(Error::shape_inconsistency(
                &target.name,
                format!(
                    "frame {frame_idx} holds {} values at '{path}'",
                    if field.is_string() { "string" } else { "numeric" }
                ),
            ));
        }

        if field.depth() > options.max_depth {
            return Err(Error::shape_inconsistency(
                &target.name,
                format!(
                    "'{path}' has {} repeat levels, more than the limit of {}",
                    field.depth(),
                    options.max_depth
                ),
            ));
        }

        let max_counts = field.max_counts();
        match shape.as_mut() {
            None => {
                shape = Some((
                    std::iter::once(frame_count)
                        .chain(max_counts.iter().copied())
                        .collect(),
                    field.dim_paths().to_vec(),
                ));
            }
            Some((dims, dim_paths)) => {
                if dims.len() != field.dim_count() {
                    return Err(Error::shape_inconsistency(
                        &target.name,
                        format!(
                            "frame {frame_idx} has {} dimensions at '{path}', expected {}",
                            field.dim_count(),
                            dims.len()
                        ),
                    ));
                }
                for (d, &count) in max_counts.iter().enumerate() {
                    if count > dims[d + 1] {
                        dims[d + 1] = count;
                        dim_paths[d + 1] = field.dim_paths()[d + 1].clone();
                    }
                }
            }
        }

        resolved_paths.push(Some(path_idx));
        missing_frames.push(false);
        frame_extents.push(max_counts);
    }

    let (mut raw_dims, dim_paths) = match shape {
        Some(shape) => shape,
        None => {
            if frame_count > 0 && !target.optional {
                return Err(Error::unknown_field(
                    &target.name,
                    format!(
                        "none of [{}] present in any of {frame_count} frames",
                        target.paths.iter().join(", ")
                    ),
                ));
            }
            if frame_count > 0 {
                log::warn!(
                    "optional field '{}' is absent from all {frame_count} frames",
                    target.name
                );
            }
            let dim_count = target.declared_dim_count();
            let mut dim_paths = target.dim_paths.clone();
            if dim_paths.is_empty() {
                dim_paths.push(Query::root());
            }
            let mut dims = vec![0usize; dim_count];
            dims[0] = frame_count;
            (dims, dim_paths)
        }
    };

    for dim in raw_dims.iter_mut().skip(1) {
        *dim = (*dim).max(1);
    }

    let inner_dims = raw_dims.len() - 1;
    for extent in frame_extents.iter_mut() {
        extent.resize(inner_dims, 0);
    }

    Ok(TargetMetaData {
        target_idx,
        type_info: target.type_info.clone(),
        dims: raw_dims.clone(),
        raw_dims,
        filtered_dims: None,
        grouped_dims: None,
        missing_frames,
        dim_paths,
        resolved_paths,
        frame_extents,
    })
}
