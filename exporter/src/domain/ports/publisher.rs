//! Publisher port trait

use async_trait::async_trait;

use crate::error::StorageError;

/// Publishes the written artifacts (e.g. commit and push)
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, message: &str) -> Result<(), StorageError>;
}
