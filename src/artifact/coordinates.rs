//! Artifact coordinates with a version range
//!
//! Accepted forms:
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `g:a:1.0` | exactly 1.0 |
//! | `g:a:[1.0,2.0)` | 1.0 <= v < 2.0 |
//! | `g:a:(,2.0]` | v <= 2.0 |
//! | `g:a:[1.0,)` | v >= 1.0 |
//! | `g:a:[1.0,1.0]` | exactly 1.0 |

use crate::error::{SyncerError, SyncerResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One end of a version range
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bound {
    pub version: String,
    pub inclusive: bool,
}

impl Bound {
    pub fn inclusive(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            inclusive: true,
        }
    }

    pub fn exclusive(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            inclusive: false,
        }
    }
}

/// Version part of the coordinates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionSpec {
    /// A bare version
    Exact(String),
    /// A bracketed range; at least one bound is present
    Range {
        lower: Option<Bound>,
        upper: Option<Bound>,
    },
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(version) => write!(f, "{}", version),
            Self::Range { lower, upper } => {
                let (open, low) = match lower {
                    Some(b) => (if b.inclusive { '[' } else { '(' }, b.version.as_str()),
                    None => ('(', ""),
                };
                let (close, high) = match upper {
                    Some(b) => (if b.inclusive { ']' } else { ')' }, b.version.as_str()),
                    None => (')', ""),
                };
                write!(f, "{}{},{}{}", open, low, high, close)
            }
        }
    }
}

/// `group:artifact:versions` filter for a metadata query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactCoordinates {
    pub group: String,
    pub artifact: String,
    pub versions: VersionSpec,
}

impl ArtifactCoordinates {
    /// Coordinates for the half-open range `[min,max)`
    pub fn between(
        group: impl Into<String>,
        artifact: impl Into<String>,
        min: impl Into<String>,
        max: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            versions: VersionSpec::Range {
                lower: Some(Bound::inclusive(min)),
                upper: Some(Bound::exclusive(max)),
            },
        }
    }

    /// Parse `group:artifact:versions`
    pub fn parse(input: &str) -> SyncerResult<Self> {
        let trimmed = input.trim();
        let mut parts = trimmed.splitn(3, ':');

        let group = parts.next().unwrap_or_default();
        let artifact = parts
            .next()
            .ok_or_else(|| SyncerError::coordinates(input, "missing artifact name"))?;
        let versions = parts
            .next()
            .ok_or_else(|| SyncerError::coordinates(input, "missing version or range"))?;

        check_name(input, "group", group)?;
        check_name(input, "artifact", artifact)?;

        Ok(Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            versions: parse_versions(input, versions)?,
        })
    }
}

fn check_name(input: &str, what: &str, value: &str) -> SyncerResult<()> {
    if value.is_empty() {
        return Err(SyncerError::coordinates(input, format!("empty {}", what)));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(SyncerError::coordinates(
            input,
            format!("{} contains whitespace", what),
        ));
    }
    Ok(())
}

fn check_version(input: &str, version: &str) -> SyncerResult<()> {
    if version
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '[' | ']' | '(' | ')' | ',' | ':'))
    {
        return Err(SyncerError::coordinates(
            input,
            format!("malformed version '{}'", version),
        ));
    }
    Ok(())
}

fn parse_versions(input: &str, versions: &str) -> SyncerResult<VersionSpec> {
    if versions.is_empty() {
        return Err(SyncerError::coordinates(input, "empty version"));
    }

    let open = match versions.chars().next() {
        Some('[') => true,
        Some('(') => false,
        _ => {
            check_version(input, versions)?;
            return Ok(VersionSpec::Exact(versions.to_string()));
        }
    };

    let close = match versions.chars().last() {
        Some(']') if versions.len() > 1 => true,
        Some(')') if versions.len() > 1 => false,
        _ => return Err(SyncerError::coordinates(input, "unterminated range")),
    };

    let inner = &versions[1..versions.len() - 1];
    let (low, high) = inner
        .split_once(',')
        .ok_or_else(|| SyncerError::coordinates(input, "range needs a ',' separator"))?;
    let (low, high) = (low.trim(), high.trim());
    check_version(input, low)?;
    check_version(input, high)?;

    let lower = if low.is_empty() {
        if open {
            return Err(SyncerError::coordinates(
                input,
                "open lower bound must use '('",
            ));
        }
        None
    } else {
        Some(Bound {
            version: low.to_string(),
            inclusive: open,
        })
    };

    let upper = if high.is_empty() {
        if close {
            return Err(SyncerError::coordinates(
                input,
                "open upper bound must use ')'",
            ));
        }
        None
    } else {
        Some(Bound {
            version: high.to_string(),
            inclusive: close,
        })
    };

    if lower.is_none() && upper.is_none() {
        return Err(SyncerError::coordinates(input, "range has no bounds"));
    }

    if let (Some(l), Some(u)) = (&lower, &upper) {
        if l.version == u.version && !(l.inclusive && u.inclusive) {
            return Err(SyncerError::coordinates(
                input,
                "single-version range must be written [v,v]",
            ));
        }
    }

    Ok(VersionSpec::Range { lower, upper })
}

impl FromStr for ArtifactCoordinates {
    type Err = SyncerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ArtifactCoordinates {
    type Error = SyncerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ArtifactCoordinates> for String {
    fn from(value: ArtifactCoordinates) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.versions)
    }
}
