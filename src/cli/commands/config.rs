//! Config command - show or initialize syncer settings

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{ConfigResolver, RepositoryConfig, SyncerConfiguration};
use crate::error::SyncerResult;
use crate::ui::{self, UiContext};

/// Execute the config command
pub async fn execute(args: ConfigArgs, resolver: &ConfigResolver) -> SyncerResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(resolver).await?,
        Some(ConfigAction::Path) => show_path(resolver),
        Some(ConfigAction::Init { force }) => init_config(resolver, force).await?,
    }

    Ok(())
}

async fn show_config(resolver: &ConfigResolver) -> SyncerResult<()> {
    let (config, _) = resolver.resolve(None).await?;
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn show_path(resolver: &ConfigResolver) {
    println!("{}", resolver.settings_path().display());
}

async fn init_config(resolver: &ConfigResolver, force: bool) -> SyncerResult<()> {
    let ctx = UiContext::detect();
    let path = resolver.settings_path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Settings already exist at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    resolver.save(&starter_settings()).await?;

    ui::step_ok_detail(&ctx, "Settings initialized", &path.display().to_string());
    Ok(())
}

/// Defaults plus a placeholder repository to edit
fn starter_settings() -> SyncerConfiguration {
    SyncerConfiguration {
        repositories: vec![RepositoryConfig {
            name: "releases".to_string(),
            url: "https://repo.example.com/releases".to_string(),
            username: None,
            password_env: None,
        }],
        ..SyncerConfiguration::default()
    }
}
