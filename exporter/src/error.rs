//! Unified error types for the exporter
//!
//! This module defines error types for each layer:
//! - `ExportError`: Core transformation errors (normalizers, linker, stage graph)
//! - `GitError`: Upstream GitLab API client errors
//! - `StorageError`: Local filesystem, serialization and process errors
//! - `AppError`: Application layer errors (wraps everything for the binary edge)

use std::path::PathBuf;

use thiserror::Error;

/// Core layer errors - raised while turning raw tables into export records
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Raw table not loaded: {0}")]
    MissingTable(String),

    #[error("Missing field `{field}` in {table}")]
    MissingField { table: String, field: String },

    #[error("Invalid field `{field}` in {table}: expected {expected}")]
    InvalidField {
        table: String,
        field: String,
        expected: &'static str,
    },

    #[error("Avatar {avatar_id} references skill {skill_id} which is not in the skill export")]
    MissingSkill { avatar_id: i64, skill_id: i64 },

    #[error("Schema discovery failed: {0}")]
    SchemaDiscovery(String),

    #[error("Stage graph contains a cycle")]
    StageCycle,
}

impl ExportError {
    pub fn missing_field(table: &str, field: &str) -> Self {
        ExportError::MissingField {
            table: table.to_string(),
            field: field.to_string(),
        }
    }

    pub fn invalid_field(table: &str, field: &str, expected: &'static str) -> Self {
        ExportError::InvalidField {
            table: table.to_string(),
            field: field.to_string(),
            expected,
        }
    }
}

/// GitLab API client errors
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid token")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Local storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Command `{command}` failed: {message}")]
    Process { command: String, message: String },
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(name: impl Into<String>, source: serde_json::Error) -> Self {
        StorageError::Json {
            name: name.into(),
            source,
        }
    }
}

/// Application layer errors - what a failed run reports
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_table_and_field() {
        let err = ExportError::missing_field("AvatarExcelConfigData", "iconName");
        assert_eq!(
            err.to_string(),
            "Missing field `iconName` in AvatarExcelConfigData"
        );
    }

    #[test]
    fn app_error_wraps_export_error_transparently() {
        let err: AppError = ExportError::MissingSkill {
            avatar_id: 10000002,
            skill_id: 40,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Avatar 10000002 references skill 40 which is not in the skill export"
        );
    }

    #[test]
    fn git_api_error_display() {
        let err = GitError::Api {
            status: 404,
            message: "404 Project Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 404 - 404 Project Not Found");
    }
}
