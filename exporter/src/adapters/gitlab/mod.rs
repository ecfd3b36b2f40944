//! GitLab adapter
//!
//! Reads commits, folder listings and raw files of the upstream project.

pub mod client;

pub use client::GitLabClient;
