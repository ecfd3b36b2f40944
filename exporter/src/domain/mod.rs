//! Domain layer
//!
//! Contains pure data and rules with no external dependencies.
//! - `entities`: Raw tables, localization and export records
//! - `ports`: Trait definitions for external collaborators

pub mod entities;
pub mod ports;
