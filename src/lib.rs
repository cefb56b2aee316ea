//! updates-sync - node-side adapter for the artifact syncer
//!
//! Resolves syncer settings, runs a full sync or a filtered metadata query
//! through an external syncer, and keeps the latest result in a shared
//! cache. Operations can run directly or on a single background worker.

pub mod artifact;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod service;
pub mod syncer;
pub mod ui;

pub use artifact::{ArtifactCoordinates, ArtifactMetadata};
pub use cache::ArtifactsMetadataCache;
pub use error::{SyncerError, SyncerResult};
pub use service::{SyncTask, SyncerService};
