//! CLI argument definitions using clap derive

use crate::artifact::ArtifactCoordinates;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// updates-sync - drive the artifact syncer from a node
///
/// Runs a full sync or a filtered metadata query through the external
/// syncer and prints the resolved artifacts.
#[derive(Parser, Debug)]
#[command(name = "updates-sync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Node member configuration (may override the settings path)
    #[arg(long, global = true, env = "UPDATES_MEMBER_CONFIG")]
    pub member_config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sync every configured artifact
    Sync(SyncArgs),

    /// Resolve metadata for one artifact within a version range
    Query(QueryArgs),

    /// Show or initialize syncer settings
    Config(ConfigArgs),
}

/// Arguments for the sync command
#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Use this settings file instead of the resolved one
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Run on the background worker and wait for its result
    #[arg(long)]
    pub queued: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the query command
#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// Artifact with version range, e.g. net.corda:corda-finance:[4.0,5.0)
    #[arg(value_parser = parse_coordinates)]
    pub coordinates: ArtifactCoordinates,

    /// Use this settings file instead of the resolved one
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Run on the background worker and wait for its result
    #[arg(long)]
    pub queued: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show resolved settings
    Show,

    /// Show settings file path
    Path,

    /// Write default settings to the resolved path
    Init {
        /// Overwrite existing settings
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for artifact listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

fn parse_coordinates(s: &str) -> Result<ArtifactCoordinates, String> {
    ArtifactCoordinates::parse(s).map_err(|e| e.to_string())
}
