//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing. They store
//! everything in memory and expose what was written so tests can verify it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::ports::{
    ArtifactKind, ArtifactSink, CommitStore, Publisher, RawArea, RawStore, TreeEntry,
    UpstreamCommit, UpstreamRepository,
};
use crate::error::{GitError, StorageError};

// ============================================================================
// In-Memory Upstream Repository
// ============================================================================

/// An upstream repository serving files from memory
#[derive(Default)]
pub struct InMemoryUpstream {
    /// Newest first
    commits: Arc<RwLock<Vec<UpstreamCommit>>>,
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    fetched: Arc<RwLock<Vec<String>>>,
    pub should_fail: Arc<RwLock<bool>>,
}

impl InMemoryUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let upstream = Self::default();
        *upstream.should_fail.write().unwrap() = true;
        upstream
    }

    /// Add a commit that becomes the newest one
    pub fn with_commit(self, id: &str, title: &str) -> Self {
        self.push_commit(id, title);
        self
    }

    pub fn with_file(self, path: &str, bytes: &[u8]) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
        self
    }

    /// Simulate a new upstream commit between runs
    pub fn push_commit(&self, id: &str, title: &str) {
        self.commits.write().unwrap().insert(
            0,
            UpstreamCommit {
                id: id.to_string(),
                title: title.to_string(),
                committed_date: None,
            },
        );
    }

    /// Paths fetched so far, in request order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.read().unwrap().clone()
    }

    fn check(&self) -> Result<(), GitError> {
        if *self.should_fail.read().unwrap() {
            return Err(GitError::Api {
                status: 500,
                message: "Mock failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UpstreamRepository for InMemoryUpstream {
    async fn list_commits(&self) -> Result<Vec<UpstreamCommit>, GitError> {
        self.check()?;
        Ok(self.commits.read().unwrap().clone())
    }

    async fn list_tree(&self, folder: &str) -> Result<Vec<TreeEntry>, GitError> {
        self.check()?;
        let prefix = format!("{}/", folder.trim_end_matches('/'));
        let mut entries: Vec<TreeEntry> = self
            .files
            .read()
            .unwrap()
            .keys()
            .filter(|path| path.starts_with(&prefix))
            .map(|path| TreeEntry {
                path: path.clone(),
                name: path.rsplit('/').next().unwrap_or(path).to_string(),
            })
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    async fn fetch_raw(&self, path: &str) -> Result<Vec<u8>, GitError> {
        self.check()?;
        self.fetched.write().unwrap().push(path.to_string());
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| GitError::Api {
                status: 404,
                message: format!("{} not found", path),
            })
    }
}

// ============================================================================
// In-Memory Raw Store
// ============================================================================

#[derive(Default)]
pub struct InMemoryRawStore {
    files: Arc<RwLock<HashMap<(RawArea, String), Vec<u8>>>>,
}

impl InMemoryRawStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the cache
    pub fn with_file(self, area: RawArea, name: &str, bytes: &[u8]) -> Self {
        self.files
            .write()
            .unwrap()
            .insert((area, name.to_string()), bytes.to_vec());
        self
    }

    pub fn file(&self, area: RawArea, name: &str) -> Option<Vec<u8>> {
        self.files
            .read()
            .unwrap()
            .get(&(area, name.to_string()))
            .cloned()
    }
}

#[async_trait]
impl RawStore for InMemoryRawStore {
    async fn write(&self, area: RawArea, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.files
            .write()
            .unwrap()
            .insert((area, name.to_string()), bytes.to_vec());
        Ok(())
    }

    async fn read(&self, area: RawArea, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.file(area, name))
    }

    async fn list(&self, area: RawArea) -> Result<Vec<String>, StorageError> {
        let mut names: Vec<String> = self
            .files
            .read()
            .unwrap()
            .keys()
            .filter(|(a, _)| *a == area)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}

// ============================================================================
// In-Memory Artifact Sink
// ============================================================================

pub type ArtifactSnapshot = HashMap<(ArtifactKind, String), Vec<u8>>;

#[derive(Default)]
pub struct InMemoryArtifactSink {
    artifacts: Arc<RwLock<ArtifactSnapshot>>,
    writes: Arc<RwLock<usize>>,
}

impl InMemoryArtifactSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ArtifactKind, file_name: &str) -> Option<Vec<u8>> {
        self.artifacts
            .read()
            .unwrap()
            .get(&(kind, file_name.to_string()))
            .cloned()
    }

    /// Parsed JSON of an artifact
    pub fn json(&self, kind: ArtifactKind, file_name: &str) -> Option<serde_json::Value> {
        self.get(kind, file_name)
            .map(|bytes| serde_json::from_slice(&bytes).unwrap())
    }

    pub fn snapshot(&self) -> ArtifactSnapshot {
        self.artifacts.read().unwrap().clone()
    }

    /// Total write calls, overwrites included
    pub fn write_count(&self) -> usize {
        *self.writes.read().unwrap()
    }
}

#[async_trait]
impl ArtifactSink for InMemoryArtifactSink {
    async fn write(
        &self,
        kind: ArtifactKind,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<(), StorageError> {
        self.artifacts
            .write()
            .unwrap()
            .insert((kind, file_name.to_string()), bytes.to_vec());
        *self.writes.write().unwrap() += 1;
        Ok(())
    }
}

// ============================================================================
// In-Memory Commit Store
// ============================================================================

#[derive(Default)]
pub struct InMemoryCommitStore {
    commit: Arc<RwLock<Option<String>>>,
}

impl InMemoryCommitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commit(self, id: &str) -> Self {
        *self.commit.write().unwrap() = Some(id.to_string());
        self
    }

    pub fn current(&self) -> Option<String> {
        self.commit.read().unwrap().clone()
    }
}

#[async_trait]
impl CommitStore for InMemoryCommitStore {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.current())
    }

    async fn save(&self, commit_id: &str) -> Result<(), StorageError> {
        *self.commit.write().unwrap() = Some(commit_id.to_string());
        Ok(())
    }
}

// ============================================================================
// Recording Publisher
// ============================================================================

/// A publisher that records every message it was asked to publish
#[derive(Default)]
pub struct RecordingPublisher {
    messages: Arc<RwLock<Vec<String>>>,
    pub should_fail: Arc<RwLock<bool>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let publisher = Self::default();
        *publisher.should_fail.write().unwrap() = true;
        publisher
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.read().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, message: &str) -> Result<(), StorageError> {
        if *self.should_fail.read().unwrap() {
            return Err(StorageError::Process {
                command: "git push".to_string(),
                message: "Mock failure".to_string(),
            });
        }
        self.messages.write().unwrap().push(message.to_string());
        Ok(())
    }
}
