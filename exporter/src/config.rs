use std::env;
use std::path::PathBuf;

use crate::app::{CostumeColumnHint, SourceSettings};
use crate::domain::entities::SourceTable;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    /// GitLab REST API root
    pub gitlab_api_url: String,
    /// GitLab web root, raw files are served from here
    pub gitlab_url: String,
    pub username: String,
    pub repository: String,
    pub project_id: String,
    pub branch: String,
    /// Sent as `PRIVATE-TOKEN` when set
    pub token: Option<String>,
    pub data_folder: String,
    pub lang_folder: String,
    /// Upstream filename per table, `None` when not configured
    pub tables: Vec<(SourceTable, Option<String>)>,
    pub raw_dir: PathBuf,
    pub export_dir: PathBuf,
    pub commit_file: PathBuf,
    pub costume_hint: CostumeColumnHint,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        Ok(Self {
            gitlab_api_url: get("GITLAB_API_URL")
                .unwrap_or_else(|| "https://gitlab.com/api/v4".to_string())
                .trim_end_matches('/')
                .to_string(),
            gitlab_url: get("GITLAB_URL")
                .unwrap_or_else(|| "https://gitlab.com".to_string())
                .trim_end_matches('/')
                .to_string(),
            username: required("GITLAB_USERNAME")?,
            repository: required("GITLAB_REPOSITORY")?,
            project_id: required("GITLAB_PROJECT_ID")?,
            branch: get("GITLAB_PROJECT_BRANCH").unwrap_or_else(|| "master".to_string()),
            token: get("GITLAB_TOKEN"),
            data_folder: get("FOLDER").unwrap_or_default(),
            lang_folder: get("LANG_FOLDER").unwrap_or_default(),
            tables: SourceTable::ALL
                .into_iter()
                .map(|table| (table, get(table.env_key())))
                .collect(),
            raw_dir: get("RAW_DIR").unwrap_or_else(|| "raw".to_string()).into(),
            export_dir: get("EXPORT_DIR")
                .unwrap_or_else(|| "exports".to_string())
                .into(),
            commit_file: get("COMMIT_FILE")
                .unwrap_or_else(|| "last_commit.txt".to_string())
                .into(),
            costume_hint: CostumeColumnHint {
                id_field: get("COSTUME_ID_FIELD"),
                icon_field: get("COSTUME_ICON_FIELD"),
            },
        })
    }

    /// Upstream layout handed to the sync service
    pub fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            data_folder: self.data_folder.clone(),
            lang_folder: self.lang_folder.clone(),
            tables: self.tables.clone(),
            costume_hint: self.costume_hint.clone(),
        }
    }
}
