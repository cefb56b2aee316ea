//! Artifact records and query coordinates
//!
//! Both types are plain values: the syncer produces [`ArtifactMetadata`],
//! callers filter queries with [`ArtifactCoordinates`]. Version ranges are
//! parsed for shape only; matching them against versions is the syncer's job.

pub mod coordinates;
pub mod metadata;

pub use coordinates::{ArtifactCoordinates, Bound, VersionSpec};
pub use metadata::ArtifactMetadata;
