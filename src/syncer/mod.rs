//! External syncer abstraction
//!
//! The actual artifact resolution lives outside this crate. A syncer is
//! built fresh from the resolved configuration for every operation, so a
//! settings change on disk is picked up by the next call.

pub mod command;

pub use command::{CommandSyncer, CommandSyncerFactory};

use crate::artifact::{ArtifactCoordinates, ArtifactMetadata};
use crate::config::SyncerConfiguration;
use crate::error::SyncerResult;
use async_trait::async_trait;

/// Client for the external artifact syncer
#[async_trait]
pub trait ArtifactSyncer: Send + Sync {
    /// Sync every configured artifact and report what was resolved
    async fn sync(&self) -> SyncerResult<Vec<ArtifactMetadata>>;

    /// Resolve metadata for one artifact within a version range
    async fn query(
        &self,
        coordinates: &ArtifactCoordinates,
    ) -> SyncerResult<Vec<ArtifactMetadata>>;

    /// Human-readable syncer name for logs
    fn name(&self) -> &'static str;
}

/// Builds a syncer from a resolved configuration
pub trait SyncerFactory: Send + Sync {
    fn create(&self, config: &SyncerConfiguration) -> SyncerResult<Box<dyn ArtifactSyncer>>;
}
