//! Artifact listing output shared by sync and query

use crate::artifact::ArtifactMetadata;
use crate::cli::args::OutputFormat;
use crate::error::SyncerResult;

/// Print artifacts to stdout in the requested format
pub fn print_artifacts(artifacts: &[ArtifactMetadata], format: OutputFormat) -> SyncerResult<()> {
    match format {
        OutputFormat::Table => print_table(artifacts),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(artifacts)?),
        OutputFormat::Plain => print_plain(artifacts),
    }
    Ok(())
}

fn print_table(artifacts: &[ArtifactMetadata]) {
    if artifacts.is_empty() {
        println!("No artifacts resolved.");
        return;
    }

    println!(
        "{:<30} {:<30} {:<14} {:<12} {}",
        "GROUP", "ARTIFACT", "VERSION", "REPOSITORY", "LOCATION"
    );
    println!("{}", "-".repeat(110));

    for artifact in artifacts {
        println!(
            "{:<30} {:<30} {:<14} {:<12} {}",
            artifact.group,
            artifact.name,
            artifact.version,
            artifact.repository.as_deref().unwrap_or("-"),
            artifact.location
        );
    }

    println!();
    println!("Total: {} artifact(s)", artifacts.len());
}

fn print_plain(artifacts: &[ArtifactMetadata]) {
    for artifact in artifacts {
        println!("{}", artifact);
    }
}
