//! The `get` entry point over a frame collection.

use std::sync::Arc;

use ahash::AHashMap;
use bufr_array::TypedArray;
use bufr_common::{Result, error::Error};
use bufr_format::Query;
use bufr_frame::Frames;

use crate::{
    analyzer::analyze,
    assembler::assemble,
    config::QuerySetConfig,
    group_by::{apply_group_by, validate_group_by},
    meta::{ResultData, TargetMetaData},
    options::AssemblyOptions,
    output,
    projector::project_in_place,
    row_filter::RowFilter,
    target::Target,
};

/// Optional parameters of [`ResultSet::get_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GetOptions<'a> {
    /// Name of the target whose distinct values group the requested field.
    pub group_by: Option<&'a str>,
    /// One of `int`, `uint`, `int32`, `uint32`, `int64`, `uint64`, `float`, `double`.
    pub type_override: Option<&'a str>,
    /// Rows to keep, see [`RowFilter`].
    pub filter: Option<&'a RowFilter>,
}

/// A set of targets over an ordered collection of decoded frames.
///
/// Every `get` is computed from scratch and leaves the result set untouched, so
/// concurrent gets over one result set are safe. Outputs of different fields are row
/// aligned: row `i` of every ungrouped output comes from frame `i` (or from the `i`-th
/// kept frame when the same filter is passed to each get).
#[derive(Debug, Clone)]
pub struct ResultSet {
    targets: Vec<Target>,
    index: AHashMap<Arc<str>, usize>,
    frames: Frames,
    options: AssemblyOptions,
}

impl ResultSet {
    pub fn new(targets: Vec<Target>, frames: Frames) -> Result<ResultSet> {
        let mut index = AHashMap::with_capacity(targets.len());
        for (idx, target) in targets.iter().enumerate() {
            if index.insert(Arc::<str>::from(target.name.as_str()), idx).is_some() {
                return Err(Error::invalid_arg(
                    "targets",
                    format!("duplicate target name '{}'", target.name),
                ));
            }
        }
        Ok(ResultSet {
            targets,
            index,
            frames,
            options: AssemblyOptions::default(),
        })
    }

    /// Creates a result set from the targets and options of a query set description.
    pub fn from_config(config: &QuerySetConfig, frames: Frames) -> Result<ResultSet> {
        Ok(ResultSet::new(config.targets()?, frames)?.with_options(config.options.clone()))
    }

    pub fn with_options(mut self, options: AssemblyOptions) -> ResultSet {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AssemblyOptions {
        &self.options
    }

    pub fn frames(&self) -> &Frames {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Target names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|target| target.name.as_str())
    }

    pub fn target(&self, field: &str) -> Option<&Target> {
        self.index.get(field).map(|&idx| &self.targets[idx])
    }

    /// Declared unit of a field.
    pub fn unit(&self, field: &str) -> Result<&str> {
        Ok(&self.lookup(field)?.1.type_info.unit)
    }

    /// Shape metadata of a field over all frames, before grouping or filtering.
    pub fn analyze_target(&self, field: &str) -> Result<TargetMetaData> {
        let (idx, target) = self.lookup(field)?;
        analyze(idx, target, &self.frames, &self.options)
    }

    /// Extracts a field, optionally grouped by another field and converted to another
    /// numeric kind. An empty `group_by` or `type_override` counts as absent.
    pub fn get(
        &self,
        field: &str,
        group_by: Option<&str>,
        type_override: Option<&str>,
    ) -> Result<TypedArray> {
        self.get_with(
            field,
            &GetOptions {
                group_by,
                type_override,
                filter: None,
            },
        )
    }

    /// Extracts a field with the given options.
    ///
    /// A frame filter is applied before grouping (to the field and the grouping key
    /// alike); a group filter after grouping, and only with a matching `group_by`.
    pub fn get_with(&self, field: &str, options: &GetOptions<'_>) -> Result<TypedArray> {
        let group_by = options.group_by.filter(|name| !name.is_empty());
        let type_override = options.type_override.filter(|name| !name.is_empty());

        let (target_idx, target) = self.lookup(field)?;
        let mut meta = analyze(target_idx, target, &self.frames, &self.options)?;

        let key = match group_by {
            Some(group_by) => {
                let (key_idx, key_target) = self.lookup(group_by).map_err(|_| {
                    Error::invalid_group_by(field, group_by, "group_by field is not a target")
                })?;
                let key_meta = analyze(key_idx, key_target, &self.frames, &self.options)?;
                validate_group_by(field, group_by, &meta, &key_meta)?;
                Some((group_by, key_target, key_meta))
            }
            None => None,
        };

        // Fail on an unusable override before doing any copying.
        output::output_kind(field, &target.type_info, type_override)?;

        let mut result = assemble(target, &meta, &self.frames)?;
        let mut key = key
            .map(|(name, key_target, key_meta)| {
                assemble(key_target, &key_meta, &self.frames)
                    .map(|data| (name, key_group_path(key_target, &key_meta), data))
            })
            .transpose()?;

        if let Some(filter) = options.filter {
            match filter.group_by.as_deref() {
                None => {
                    project_in_place(field, &mut result, &filter.rows)?;
                    if let Some((name, _, key_data)) = key.as_mut() {
                        project_in_place(name, key_data, &filter.rows)?;
                    }
                    meta.filtered_dims = Some(result.dims.clone());
                    meta.dims = result.dims.clone();
                }
                Some(filter_domain) if Some(filter_domain) != group_by => {
                    return Err(Error::invalid_arg(
                        "filter",
                        format!(
                            "filter over groups of '{filter_domain}' applied to '{field}' {}",
                            match group_by {
                                Some(group_by) => format!("grouped by '{group_by}'"),
                                None => "without grouping".to_string(),
                            }
                        ),
                    ));
                }
                Some(_) => {}
            }
        }

        if let Some((_, key_path, key_data)) = key.as_ref() {
            apply_group_by(field, &mut result, &mut meta, key_data, key_path)?;
        }

        if let Some(filter) = options.filter.filter(|filter| filter.group_by.is_some()) {
            project_in_place(field, &mut result, &filter.rows)?;
            meta.filtered_dims = Some(result.dims.clone());
            meta.dims = result.dims.clone();
        }

        log::debug!(
            "get '{field}' (group_by: {group_by:?}, type: {type_override:?}): present in {} of {} frames, raw {:?} -> {:?}",
            meta.present_count(),
            meta.missing_frames.len(),
            meta.raw_dims,
            result.dims
        );

        let ResultData {
            buffer,
            dims,
            dim_paths,
            ..
        } = result;
        output::build(
            field,
            group_by,
            &meta.type_info,
            type_override,
            &buffer,
            dims,
            dim_paths,
        )
    }

    /// Extracts every target, ungrouped and with native kinds, keyed by name.
    pub fn get_all(&self, filter: Option<&RowFilter>) -> Result<AHashMap<String, TypedArray>> {
        self.targets
            .iter()
            .map(|target| {
                let array = self.get_with(
                    &target.name,
                    &GetOptions {
                        filter,
                        ..Default::default()
                    },
                )?;
                Ok((target.name.clone(), array))
            })
            .collect()
    }

    fn lookup(&self, field: &str) -> Result<(usize, &Target)> {
        self.index
            .get(field)
            .map(|&idx| (idx, &self.targets[idx]))
            .ok_or_else(|| Error::unknown_field(field, "not a target of this result set"))
    }
}

/// Path used for the group dimension: the grouping field's own path, as resolved in the
/// first frame that holds it.
fn key_group_path(target: &Target, meta: &TargetMetaData) -> Query {
    meta.resolved_paths
        .iter()
        .flatten()
        .next()
        .and_then(|&idx| target.paths.get(idx))
        .or_else(|| target.paths.first())
        .cloned()
        .unwrap_or_else(Query::root)
}
