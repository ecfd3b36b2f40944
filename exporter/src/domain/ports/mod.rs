//! Domain ports (traits)
//!
//! Port traits define the external collaborators the pipeline needs.
//! Adapters provide concrete implementations of these traits.

pub mod publisher;
pub mod storage;
pub mod upstream;

pub use publisher::Publisher;
pub use storage::{ArtifactKind, ArtifactSink, CommitStore, RawArea, RawStore};
pub use upstream::{TreeEntry, UpstreamCommit, UpstreamRepository};
