//! Sync command - sync every configured artifact

use crate::cli::args::SyncArgs;
use crate::cli::commands::{explicit_settings, report};
use crate::error::SyncerResult;
use crate::service::SyncerService;
use crate::ui::{TaskSpinner, UiContext};
use tracing::debug;

/// Execute the sync command
pub async fn execute(args: SyncArgs, service: &SyncerService) -> SyncerResult<()> {
    let explicit = explicit_settings(args.settings.as_deref()).await?;
    let ctx = UiContext::detect();

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Syncing artifacts...");

    let result = if args.queued {
        let task = service.sync_artifacts_async(explicit);
        debug!("Queued sync as job {}", task.id());
        task.await
    } else {
        service.sync_artifacts(explicit).await
    };

    match result {
        Ok(artifacts) => {
            spinner.stop(&format!("Synced {} artifact(s)", artifacts.len()));
            report::print_artifacts(&artifacts, args.format)
        }
        Err(e) => {
            spinner.stop_error("Sync failed");
            Err(e)
        }
    }
}
