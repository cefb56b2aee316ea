//! updates-sync - artifact syncer adapter
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use updates_sync::cache::ArtifactsMetadataCache;
use updates_sync::cli::{Cli, Commands, LogFormat};
use updates_sync::config::{load_member_config, ConfigResolver};
use updates_sync::error::SyncerResult;
use updates_sync::service::SyncerService;
use updates_sync::syncer::CommandSyncerFactory;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> SyncerResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("updates_sync=warn"),
        1 => EnvFilter::new("updates_sync=info"),
        _ => EnvFilter::new("updates_sync=debug"),
    };

    match cli.log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }

    let member = load_member_config(cli.member_config.as_deref()).await?;
    let resolver = ConfigResolver::new(&member);
    debug!("Settings path: {}", resolver.settings_path().display());

    // Config command doesn't need the service
    let command = match cli.command {
        Commands::Config(args) => {
            return updates_sync::cli::commands::config(args, &resolver).await;
        }
        command => command,
    };

    let cache = Arc::new(ArtifactsMetadataCache::new());
    let service = SyncerService::start(cache, resolver, Arc::new(CommandSyncerFactory));

    let result = match command {
        Commands::Config(_) => unreachable!("Config handled above"),
        Commands::Sync(args) => updates_sync::cli::commands::sync(args, &service).await,
        Commands::Query(args) => updates_sync::cli::commands::query(args, &service).await,
    };

    service.shutdown().await;
    result
}
