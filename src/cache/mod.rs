//! In-memory cache of the latest artifact metadata
//!
//! Holds the result of whichever sync or query completed last. The sequence
//! is replaced as a whole on every successful operation; it is never merged,
//! appended to, or evicted.
//!
//! # Ownership
//!
//! The cache is shared through an `Arc`. Any holder may read it; only the
//! syncer service writes it.

pub mod metadata;

pub use metadata::{ArtifactsMetadataCache, CacheOrigin, CacheSnapshot};
