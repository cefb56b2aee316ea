//! Query command - resolve metadata for one artifact

use crate::cli::args::QueryArgs;
use crate::cli::commands::{explicit_settings, report};
use crate::error::SyncerResult;
use crate::service::SyncerService;
use crate::ui::{TaskSpinner, UiContext};
use tracing::debug;

/// Execute the query command
pub async fn execute(args: QueryArgs, service: &SyncerService) -> SyncerResult<()> {
    let explicit = explicit_settings(args.settings.as_deref()).await?;
    let ctx = UiContext::detect();

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Querying {}...", args.coordinates));

    let result = if args.queued {
        let task = service.get_artifacts_metadata_async(args.coordinates.clone(), explicit);
        debug!("Queued query as job {}", task.id());
        task.await
    } else {
        service
            .get_artifacts_metadata(&args.coordinates, explicit)
            .await
    };

    match result {
        Ok(artifacts) => {
            spinner.stop(&format!(
                "{} matched {} artifact(s)",
                args.coordinates,
                artifacts.len()
            ));
            report::print_artifacts(&artifacts, args.format)
        }
        Err(e) => {
            spinner.stop_error("Query failed");
            Err(e)
        }
    }
}
