//! Raw download cache on disk
//!
//! `<root>/data` holds configuration tables, `<root>/langs` text tables.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::ports::{RawArea, RawStore};
use crate::error::StorageError;

use super::write_file;

pub struct FsRawStore {
    root: PathBuf,
}

impl FsRawStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn area_dir(&self, area: RawArea) -> PathBuf {
        match area {
            RawArea::Data => self.root.join("data"),
            RawArea::Langs => self.root.join("langs"),
        }
    }

    /// Cached file path; names are flat file names, never paths
    fn file_path(&self, area: RawArea, name: &str) -> PathBuf {
        let name = Path::new(name)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(name));
        self.area_dir(area).join(name)
    }
}

#[async_trait]
impl RawStore for FsRawStore {
    async fn write(&self, area: RawArea, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.file_path(area, name);
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Caching raw file");
        write_file(&path, bytes).await
    }

    async fn read(&self, area: RawArea, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.file_path(area, name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    async fn list(&self, area: RawArea) -> Result<Vec<String>, StorageError> {
        let dir = self.area_dir(area);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(dir, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::io(&dir, e))?
        {
            let is_file = entry
                .file_type()
                .await
                .map_err(|e| StorageError::io(entry.path(), e))?
                .is_file();
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
