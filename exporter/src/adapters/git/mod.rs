//! Git adapter
//!
//! Publishes the export directory by committing and pushing it.

pub mod publisher;

pub use publisher::GitPublisher;
