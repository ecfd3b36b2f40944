//! Sync service
//!
//! One export run: compare the newest upstream commit with the last processed
//! one, refresh the raw cache, build and write every domain, publish, then
//! record the commit. The commit is recorded last, so a failed run is retried
//! from scratch on the next invocation.

use std::sync::Arc;

use crate::domain::entities::ExportDomain;
use crate::domain::ports::{
    ArtifactSink, CommitStore, Publisher, RawArea, RawStore, UpstreamCommit, UpstreamRepository,
};
use crate::error::AppError;

use super::costume::CostumeColumnHint;
use super::export_service::ExportService;
use super::loader::{load_localization, load_tables, TableSource};
use super::pipeline::Pipeline;

/// Per-run switches
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Write artifacts but do not publish them
    pub skip_publish: bool,
    /// Run even when the upstream commit was already processed
    pub force: bool,
    /// Reuse the raw cache instead of downloading
    pub skip_download: bool,
}

/// Where upstream files live and how to read them
#[derive(Debug, Clone, Default)]
pub struct SourceSettings {
    /// Folder holding the configuration tables
    pub data_folder: String,
    /// Folder holding the localization text tables
    pub lang_folder: String,
    pub tables: Vec<TableSource>,
    pub costume_hint: CostumeColumnHint,
}

/// Summary of a completed export
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub commit_id: String,
    /// Record count of every built domain, in export order
    pub record_counts: Vec<(ExportDomain, usize)>,
    pub published: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The newest upstream commit was already processed
    UpToDate,
    Exported(RunReport),
}

/// Service driving a full export run
pub struct SyncService<U, R, A, C, P>
where
    U: UpstreamRepository,
    R: RawStore,
    A: ArtifactSink,
    C: CommitStore,
    P: Publisher,
{
    upstream: Arc<U>,
    raw_store: Arc<R>,
    exporter: ExportService<A>,
    commit_store: Arc<C>,
    publisher: Arc<P>,
    settings: SourceSettings,
}

impl<U, R, A, C, P> SyncService<U, R, A, C, P>
where
    U: UpstreamRepository,
    R: RawStore,
    A: ArtifactSink,
    C: CommitStore,
    P: Publisher,
{
    pub fn new(
        upstream: Arc<U>,
        raw_store: Arc<R>,
        sink: Arc<A>,
        commit_store: Arc<C>,
        publisher: Arc<P>,
        settings: SourceSettings,
    ) -> Self {
        Self {
            upstream,
            raw_store,
            exporter: ExportService::new(sink),
            commit_store,
            publisher,
            settings,
        }
    }

    pub async fn run(&self, options: RunOptions) -> Result<SyncOutcome, AppError> {
        tracing::debug!("Fetching upstream commits");
        let commits = self.upstream.list_commits().await?;
        let latest = commits.into_iter().next();
        let latest_id = latest.as_ref().map(|c| c.id.clone()).unwrap_or_default();
        match &latest {
            Some(commit) => tracing::debug!(
                commit = %commit.id,
                committed_at = ?commit.committed_date,
                "Latest upstream commit"
            ),
            None => tracing::debug!("No upstream commits found"),
        }

        let local_id = self.commit_store.load().await?.unwrap_or_default();
        if local_id == latest_id && !options.force {
            tracing::info!(commit = %latest_id, "Already up to date");
            return Ok(SyncOutcome::UpToDate);
        }
        tracing::info!(commit = %latest_id, previous = %local_id, force = options.force, "Exporting");

        if options.skip_download {
            tracing::info!("Download skipped, using cached raw files");
        } else {
            self.download().await?;
        }

        let tables = load_tables(self.raw_store.as_ref(), &self.settings.tables).await?;
        let index = load_localization(self.raw_store.as_ref()).await?;
        let bundle = Pipeline::new(&tables, &self.settings.costume_hint).run()?;
        self.exporter.export(&bundle, &index).await?;

        let published = if options.skip_publish {
            tracing::info!("Publish skipped");
            false
        } else {
            self.publisher.publish(&commit_message(latest.as_ref())).await?;
            true
        };

        self.commit_store.save(&latest_id).await?;
        tracing::debug!(commit = %latest_id, "Saved processed commit");

        let record_counts = ExportDomain::ALL
            .into_iter()
            .filter_map(|domain| bundle.record_count(domain).map(|n| (domain, n)))
            .collect();

        Ok(SyncOutcome::Exported(RunReport {
            commit_id: latest_id,
            record_counts,
            published,
        }))
    }

    /// Refresh the raw cache: configured tables, then every localization file
    async fn download(&self) -> Result<(), AppError> {
        for (source, file_name) in &self.settings.tables {
            let Some(file_name) = file_name else {
                tracing::error!(table = %source, "Table filename not configured");
                continue;
            };

            let path = format!("{}/{}", self.settings.data_folder, file_name);
            tracing::debug!(table = %source, %path, "Downloading table");
            let bytes = self.upstream.fetch_raw(&path).await?;
            self.raw_store.write(RawArea::Data, file_name, &bytes).await?;
        }

        let entries = self.upstream.list_tree(&self.settings.lang_folder).await?;
        tracing::debug!(files = entries.len(), "Downloading localization files");
        for entry in entries {
            let bytes = self.upstream.fetch_raw(&entry.path).await?;
            self.raw_store
                .write(RawArea::Langs, &entry.name, &bytes)
                .await?;
        }

        Ok(())
    }
}

/// Publish message: upstream title plus a masked short SHA
pub fn commit_message(commit: Option<&UpstreamCommit>) -> String {
    let (title, id) = commit
        .map(|c| (c.title.as_str(), c.id.as_str()))
        .unwrap_or_default();
    let short: String = id.chars().skip(10).take(5).collect();
    format!(
        "{}\n- SHA: *********{}************\n- URL: [private]",
        title, short
    )
}
