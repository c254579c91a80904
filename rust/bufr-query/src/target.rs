//! Requested output fields.

use bufr_common::Result;
use bufr_format::{Query, TypeInfo};

/// One requested output field.
///
/// `paths` are alternative query paths that may satisfy the field, tried in order for
/// every frame; the first path present in a frame is the one used for that frame.
/// `dim_paths` declares the query path of each dimension (dimension 0 being the message
/// itself) and is used when no frame provides the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub paths: Vec<Query>,
    pub type_info: TypeInfo,
    pub dim_paths: Vec<Query>,
    pub optional: bool,
}

impl Target {
    /// Creates a target without repeat levels.
    pub fn new(name: impl Into<String>, paths: Vec<Query>, type_info: TypeInfo) -> Target {
        Target {
            name: name.into(),
            paths,
            type_info,
            dim_paths: vec![Query::root()],
            optional: false,
        }
    }

    /// Creates a target from query strings.
    pub fn parse(name: impl Into<String>, paths: &[&str], type_info: TypeInfo) -> Result<Target> {
        let paths = paths
            .iter()
            .map(|p| Query::parse(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Target::new(name, paths, type_info))
    }

    /// Sets the per-dimension query paths from query strings.
    pub fn with_dim_paths(mut self, dim_paths: &[&str]) -> Result<Target> {
        self.dim_paths = dim_paths
            .iter()
            .map(|p| Query::parse(p))
            .collect::<Result<Vec<_>>>()?;
        if self.dim_paths.is_empty() {
            self.dim_paths.push(Query::root());
        }
        Ok(self)
    }

    pub fn with_optional(mut self, optional: bool) -> Target {
        self.optional = optional;
        self
    }

    /// Returns `true` if the field has no repeat levels.
    pub fn is_leaf(&self) -> bool {
        self.dim_paths.len() <= 1
    }

    /// Number of dimensions declared for the field, at least one.
    pub fn declared_dim_count(&self) -> usize {
        self.dim_paths.len().max(1)
    }

    /// Index of the first candidate path present in `frame`.
    pub fn resolve(&self, frame: &bufr_frame::Frame) -> Option<usize> {
        self.paths.iter().position(|path| frame.contains(path))
    }
}
