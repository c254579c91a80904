//! JSON description of a query set: targets, filters and engine options.

use bufr_common::{Result, error::Error};
use bufr_format::{Query, TypeInfo, ValueKind};
use serde::{Deserialize, Serialize};

use crate::{filters::BoundingFilter, options::AssemblyOptions, target::Target};

/// Description of one target.
///
/// The element type is given either as packing metadata (`type`) or directly as an
/// output kind (`kind`); `type` wins when both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub name: String,
    pub paths: Vec<String>,
    #[serde(default, rename = "type")]
    pub type_info: Option<TypeInfo>,
    #[serde(default)]
    pub kind: Option<ValueKind>,
    #[serde(default)]
    pub dim_paths: Vec<String>,
    #[serde(default)]
    pub optional: bool,
}

impl TargetConfig {
    pub fn to_target(&self) -> Result<Target> {
        if self.paths.is_empty() {
            return Err(Error::invalid_arg(
                "paths",
                format!("target '{}' has no query paths", self.name),
            ));
        }
        let type_info = match (&self.type_info, self.kind) {
            (Some(type_info), _) => type_info.clone(),
            (None, Some(kind)) => TypeInfo::for_kind(kind),
            (None, None) => {
                return Err(Error::invalid_arg(
                    "type",
                    format!("target '{}' declares neither type nor kind", self.name),
                ));
            }
        };
        let paths = self
            .paths
            .iter()
            .map(|p| Query::parse(p))
            .collect::<Result<Vec<_>>>()?;
        let dim_paths = self.dim_paths.iter().map(String::as_str).collect::<Vec<_>>();

        Ok(Target::new(self.name.clone(), paths, type_info)
            .with_dim_paths(&dim_paths)?
            .with_optional(self.optional))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterConfig {
    Bounding(BoundingFilter),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuerySetConfig {
    pub targets: Vec<TargetConfig>,
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
    #[serde(default)]
    pub options: AssemblyOptions,
}

impl QuerySetConfig {
    /// Parses and validates a query set description.
    pub fn from_json(json: &str) -> Result<QuerySetConfig> {
        let config: QuerySetConfig = serde_json::from_str(json)?;
        for filter in &config.filters {
            match filter {
                FilterConfig::Bounding(bounding) => bounding.validate()?,
            }
        }
        Ok(config)
    }

    /// Builds the targets, parsing their query strings.
    pub fn targets(&self) -> Result<Vec<Target>> {
        self.targets.iter().map(TargetConfig::to_target).collect()
    }

    pub fn bounding_filters(&self) -> impl Iterator<Item = &BoundingFilter> {
        self.filters.iter().map(|filter| match filter {
            FilterConfig::Bounding(bounding) => bounding,
        })
    }
}
