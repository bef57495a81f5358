use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-level column label: (signal group, axis, unit)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnKey {
    /// Signal group, e.g. `RPelvisAngles`
    pub group: String,
    /// Axis component, e.g. `Z'`
    pub axis: String,
    /// Unit string, e.g. `deg/s`
    pub unit: String,
}

impl ColumnKey {
    /// Create a key from its three labels
    pub fn new(group: impl Into<String>, axis: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            axis: axis.into(),
            unit: unit.into(),
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.group, self.axis, self.unit)
    }
}
