//! Test utilities
//!
//! Manual in-memory implementations of every port and fixture builders for
//! raw tables. The mocks record what the services did so tests can assert on
//! it without touching the network, the filesystem or git.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
