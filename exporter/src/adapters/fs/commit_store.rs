//! Last processed commit, kept in a small text file

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::ports::CommitStore;
use crate::error::StorageError;

use super::write_file;

pub struct FileCommitStore {
    path: PathBuf,
}

impl FileCommitStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CommitStore for FileCommitStore {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let id = content.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }

    async fn save(&self, commit_id: &str) -> Result<(), StorageError> {
        write_file(&self.path, commit_id.as_bytes()).await
    }
}
