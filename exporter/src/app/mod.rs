//! Application layer
//!
//! The export core and its orchestration. Normalizers and the character
//! linker are pure functions over raw tables; the services drive them through
//! the ports.

pub mod character_linker;
pub mod costume;
pub mod export_service;
pub mod loader;
pub mod normalizers;
pub mod pipeline;
pub mod projector;
pub mod sync_service;

pub use costume::CostumeColumnHint;
pub use sync_service::{RunOptions, SourceSettings, SyncOutcome, SyncService};
