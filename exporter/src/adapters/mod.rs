//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod fs;
pub mod git;
pub mod gitlab;

pub use fs::{FileCommitStore, FsArtifactSink, FsRawStore};
pub use git::GitPublisher;
pub use gitlab::GitLabClient;
