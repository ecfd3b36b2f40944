//! Upstream repository port trait
//!
//! Defines the interface for reading the remote game-data repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GitError;

/// A commit of the upstream repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamCommit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub committed_date: Option<DateTime<Utc>>,
}

/// A file found while listing a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Path from the repository root
    pub path: String,
    /// File name only
    pub name: String,
}

/// Port trait for upstream repository operations
#[async_trait]
pub trait UpstreamRepository: Send + Sync {
    /// List commits on the configured branch, newest first (may be empty)
    async fn list_commits(&self) -> Result<Vec<UpstreamCommit>, GitError>;

    /// List every file under a folder, recursively
    async fn list_tree(&self, folder: &str) -> Result<Vec<TreeEntry>, GitError>;

    /// Fetch the raw content of one file
    async fn fetch_raw(&self, path: &str) -> Result<Vec<u8>, GitError>;
}
