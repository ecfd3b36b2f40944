//! Export directory on disk
//!
//! Data artifacts go to the export root, localization artifacts to `langs/`.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::ports::{ArtifactKind, ArtifactSink};
use crate::error::StorageError;

use super::write_file;

pub struct FsArtifactSink {
    root: PathBuf,
}

impl FsArtifactSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, kind: ArtifactKind, file_name: &str) -> PathBuf {
        match kind {
            ArtifactKind::Data => self.root.join(file_name),
            ArtifactKind::Localization => self.root.join("langs").join(file_name),
        }
    }
}

#[async_trait]
impl ArtifactSink for FsArtifactSink {
    async fn write(
        &self,
        kind: ArtifactKind,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<(), StorageError> {
        write_file(&self.path(kind, file_name), bytes).await
    }
}
