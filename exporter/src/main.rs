//! Game data exporter
//!
//! Mirrors the configuration and localization tables of an upstream GitLab
//! repository, normalizes them into per-domain JSON artifacts and publishes
//! the result. Uses hexagonal (ports & adapters) architecture: the export
//! core never touches the network, the filesystem or git directly.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod cli;
mod config;
mod domain;
mod error;

#[cfg(test)]
mod test_utils;


use adapters::{FileCommitStore, FsArtifactSink, FsRawStore, GitLabClient, GitPublisher};
use app::{SyncOutcome, SyncService};
use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gamedata_exporter=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing::info!(
        project = %format!("{}/{}", config.username, config.repository),
        branch = %config.branch,
        "Starting export run"
    );

    // Create adapters
    let upstream = Arc::new(GitLabClient::new(
        config.gitlab_api_url.clone(),
        config.gitlab_url.clone(),
        &config.username,
        &config.repository,
        config.project_id.clone(),
        config.branch.clone(),
        config.token.clone(),
    ));
    let raw_store = Arc::new(FsRawStore::new(&config.raw_dir));
    let sink = Arc::new(FsArtifactSink::new(&config.export_dir));
    let commit_store = Arc::new(FileCommitStore::new(&config.commit_file));
    let publisher = Arc::new(GitPublisher::new(&config.export_dir));

    let service = SyncService::new(
        upstream,
        raw_store,
        sink,
        commit_store,
        publisher,
        config.source_settings(),
    );

    match service.run(cli.run_options()).await {
        Ok(SyncOutcome::UpToDate) => {
            tracing::info!("Nothing to do");
        }
        Ok(SyncOutcome::Exported(report)) => {
            for (domain, records) in &report.record_counts {
                tracing::info!(%domain, records, "Exported");
            }
            tracing::info!(
                commit = %report.commit_id,
                domains = report.record_counts.len(),
                published = report.published,
                "Export run complete"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Export run failed");
            return Err(e.into());
        }
    }

    Ok(())
}
