//! Resolved artifact metadata as reported by the syncer

use serde::{Deserialize, Serialize};
use std::fmt;

/// One resolved artifact version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Group the artifact is published under
    pub group: String,

    /// Artifact name
    pub name: String,

    /// Resolved version
    pub version: String,

    /// Where the artifact was resolved or stored
    pub location: String,

    /// Repository the artifact came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl ArtifactMetadata {
    /// Create a new metadata record
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            location: location.into(),
            repository: None,
        }
    }
}

impl fmt::Display for ArtifactMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}
