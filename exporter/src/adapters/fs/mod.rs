//! Filesystem adapter
//!
//! Raw download cache, export directory and last-commit file.

pub mod artifact_sink;
pub mod commit_store;
pub mod raw_store;

pub use artifact_sink::FsArtifactSink;
pub use commit_store::FileCommitStore;
pub use raw_store::FsRawStore;

use std::path::Path;

use crate::error::StorageError;

/// Write a file, creating its parent directories
pub(crate) async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::io(parent, e))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| StorageError::io(path, e))
}
