//! CLI command implementations

pub mod config;
pub mod query;
pub mod report;
pub mod sync;

pub use config::execute as config;
pub use query::execute as query;
pub use sync::execute as sync;

use crate::config::{load_settings, SyncerConfiguration};
use crate::error::{SyncerError, SyncerResult};
use std::path::Path;

/// Load `--settings` as an explicit configuration, if given
async fn explicit_settings(path: Option<&Path>) -> SyncerResult<Option<SyncerConfiguration>> {
    match path {
        Some(path) if !path.exists() => Err(SyncerError::ConfigNotFound(path.to_path_buf())),
        Some(path) => Ok(Some(load_settings(path).await?)),
        None => Ok(None),
    }
}
