//! Syncer service
//!
//! Resolves the syncer configuration, builds a syncer for the call, runs
//! a full sync or a filtered query, and stores the result in the shared
//! [`ArtifactsMetadataCache`].
//!
//! Every operation comes in two flavours:
//!
//! - direct (`sync_artifacts`, `get_artifacts_metadata`): runs on the
//!   caller's task and returns the result;
//! - queued (`*_async`): handed to a single background worker and returned
//!   as a [`SyncTask`] that resolves to the result or the error.
//!
//! Direct and queued writers are not ordered against each other: whichever
//! operation completes last owns the cache.

mod worker;

pub use worker::SyncTask;

use crate::artifact::{ArtifactCoordinates, ArtifactMetadata};
use crate::cache::{ArtifactsMetadataCache, CacheOrigin};
use crate::config::{ConfigResolver, ConfigSource, SyncerConfiguration};
use crate::error::SyncerResult;
use crate::syncer::SyncerFactory;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use worker::SyncWorker;

/// The two operations the syncer supports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOperation {
    /// Sync everything the configuration lists
    Sync,
    /// Resolve metadata for one artifact within a version range
    Query(ArtifactCoordinates),
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => write!(f, "sync"),
            Self::Query(coordinates) => write!(f, "query {}", coordinates),
        }
    }
}

/// State shared between direct calls and the worker
pub(crate) struct SyncerCore {
    cache: Arc<ArtifactsMetadataCache>,
    resolver: ConfigResolver,
    factory: Arc<dyn SyncerFactory>,
}

impl SyncerCore {
    /// Resolve config, run the operation, and cache a successful result
    pub(crate) async fn execute(
        &self,
        operation: &SyncOperation,
        explicit: Option<SyncerConfiguration>,
    ) -> SyncerResult<Vec<ArtifactMetadata>> {
        let (config, source) = self.resolver.resolve(explicit).await?;
        match &source {
            ConfigSource::Explicit => debug!("Running {} with explicit settings", operation),
            ConfigSource::File(path) => {
                debug!("Running {} with settings from {}", operation, path.display())
            }
        }

        let syncer = self.factory.create(&config)?;
        let artifacts = match operation {
            SyncOperation::Sync => syncer.sync().await?,
            SyncOperation::Query(coordinates) => syncer.query(coordinates).await?,
        };

        info!(
            "{} syncer {} returned {} artifacts",
            syncer.name(),
            operation,
            artifacts.len()
        );

        let origin = match operation {
            SyncOperation::Sync => CacheOrigin::Sync,
            SyncOperation::Query(coordinates) => CacheOrigin::Query(coordinates.clone()),
        };
        self.cache.replace(artifacts.clone(), origin);

        Ok(artifacts)
    }
}

/// Drives the external syncer and owns the write side of the cache
pub struct SyncerService {
    core: Arc<SyncerCore>,
    worker: SyncWorker,
}

impl SyncerService {
    /// Start the service and its background worker
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        cache: Arc<ArtifactsMetadataCache>,
        resolver: ConfigResolver,
        factory: Arc<dyn SyncerFactory>,
    ) -> Self {
        let core = Arc::new(SyncerCore {
            cache,
            resolver,
            factory,
        });
        let worker = SyncWorker::spawn(Arc::clone(&core));

        Self { core, worker }
    }

    /// Shared handle to the cache this service writes
    pub fn cache(&self) -> Arc<ArtifactsMetadataCache> {
        Arc::clone(&self.core.cache)
    }

    /// Sync all configured artifacts and cache the result
    pub async fn sync_artifacts(
        &self,
        config: Option<SyncerConfiguration>,
    ) -> SyncerResult<Vec<ArtifactMetadata>> {
        self.core.execute(&SyncOperation::Sync, config).await
    }

    /// Query metadata for one artifact and cache the result
    pub async fn get_artifacts_metadata(
        &self,
        coordinates: &ArtifactCoordinates,
        config: Option<SyncerConfiguration>,
    ) -> SyncerResult<Vec<ArtifactMetadata>> {
        self.core
            .execute(&SyncOperation::Query(coordinates.clone()), config)
            .await
    }

    /// Like [`Self::get_artifacts_metadata`], parsing `group:artifact:[min,max)` first
    pub async fn get_artifacts_metadata_str(
        &self,
        coordinates: &str,
        config: Option<SyncerConfiguration>,
    ) -> SyncerResult<Vec<ArtifactMetadata>> {
        let coordinates = ArtifactCoordinates::parse(coordinates)?;
        self.get_artifacts_metadata(&coordinates, config).await
    }

    /// Queue a full sync on the background worker
    pub fn sync_artifacts_async(&self, config: Option<SyncerConfiguration>) -> SyncTask {
        self.worker.submit(SyncOperation::Sync, config)
    }

    /// Queue a metadata query on the background worker
    pub fn get_artifacts_metadata_async(
        &self,
        coordinates: ArtifactCoordinates,
        config: Option<SyncerConfiguration>,
    ) -> SyncTask {
        self.worker.submit(SyncOperation::Query(coordinates), config)
    }

    /// Stop accepting work and wait for queued jobs to finish
    pub async fn shutdown(self) {
        info!("Shutting down syncer service");
        self.worker.shutdown().await;
    }
}
