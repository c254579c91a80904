use serde::{Deserialize, Serialize};

/// Default limit on the number of dimensions of a field.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Engine settings shared by every `get` call of a result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyOptions {
    /// Maximum number of repeat levels accepted below the message. Fields nested deeper
    /// fail with a shape inconsistency.
    pub max_depth: usize,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        AssemblyOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
