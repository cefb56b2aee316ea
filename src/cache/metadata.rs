//! Latest-result cache for artifact metadata

use crate::artifact::{ArtifactCoordinates, ArtifactMetadata};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Which operation produced the cached sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOrigin {
    /// Full sync
    Sync,
    /// Filtered metadata query
    Query(ArtifactCoordinates),
}

impl fmt::Display for CacheOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => write!(f, "sync"),
            Self::Query(coordinates) => write!(f, "query {}", coordinates),
        }
    }
}

/// A point-in-time view of the cache
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    /// Artifacts in the order the syncer returned them
    pub artifacts: Vec<ArtifactMetadata>,

    /// When the snapshot was written
    pub updated_at: DateTime<Utc>,

    /// Operation that produced it
    pub origin: CacheOrigin,
}

/// Shared cache of the most recent sync or query result
#[derive(Debug, Default)]
pub struct ArtifactsMetadataCache {
    current: RwLock<Option<Arc<CacheSnapshot>>>,
}

impl ArtifactsMetadataCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Current artifacts, empty until the first successful operation
    pub fn get(&self) -> Vec<ArtifactMetadata> {
        self.snapshot()
            .map(|s| s.artifacts.clone())
            .unwrap_or_default()
    }

    /// Current snapshot with its timestamp and origin
    pub fn snapshot(&self) -> Option<Arc<CacheSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of cached artifacts
    pub fn len(&self) -> usize {
        self.snapshot().map_or(0, |s| s.artifacts.len())
    }

    /// Whether no artifacts are cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the cached sequence wholesale
    pub(crate) fn replace(&self, artifacts: Vec<ArtifactMetadata>, origin: CacheOrigin) {
        debug!("Caching {} artifacts from {}", artifacts.len(), origin);

        let snapshot = Arc::new(CacheSnapshot {
            artifacts,
            updated_at: Utc::now(),
            origin,
        });

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }
}
