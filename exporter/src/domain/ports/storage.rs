//! Local storage port traits
//!
//! Raw file cache, export artifact sink and the last-processed commit id.

use async_trait::async_trait;

use crate::error::StorageError;

/// Area of the raw cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawArea {
    /// Configuration tables
    Data,
    /// Localization text tables
    Langs,
}

/// Kind of export artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Normalized domain records
    Data,
    /// Localization projection of a domain
    Localization,
}

/// Local cache of downloaded upstream files
#[async_trait]
pub trait RawStore: Send + Sync {
    /// Store a downloaded file, replacing any previous copy
    async fn write(&self, area: RawArea, name: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Read a cached file, `None` when it was never downloaded
    async fn read(&self, area: RawArea, name: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Names of cached files in an area, sorted
    async fn list(&self, area: RawArea) -> Result<Vec<String>, StorageError>;
}

/// Destination of export artifacts
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn write(
        &self,
        kind: ArtifactKind,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<(), StorageError>;
}

/// Persistence of the last processed upstream commit
#[async_trait]
pub trait CommitStore: Send + Sync {
    /// Last processed commit id, `None` when nothing was processed yet
    async fn load(&self) -> Result<Option<String>, StorageError>;

    async fn save(&self, commit_id: &str) -> Result<(), StorageError>;
}
