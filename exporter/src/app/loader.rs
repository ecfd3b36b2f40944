//! Raw cache loader
//!
//! Reads the configured tables and every localization file back out of the
//! raw cache.

use std::collections::HashMap;

use serde_json::Value;

use crate::domain::entities::{LocalizationIndex, RawTable, RawTables, SourceTable};
use crate::domain::ports::{RawArea, RawStore};
use crate::error::{AppError, StorageError};

/// A source table and the upstream filename configured for it
pub type TableSource = (SourceTable, Option<String>);

/// Load every configured table present in the cache.
///
/// Unconfigured tables and tables absent from the cache are gaps: logged and
/// left out, so the stages needing them are skipped.
pub async fn load_tables<R: RawStore + ?Sized>(
    store: &R,
    sources: &[TableSource],
) -> Result<RawTables, AppError> {
    let mut tables = RawTables::new();

    for (source, file_name) in sources {
        let Some(file_name) = file_name else {
            tracing::warn!(table = %source, "No filename configured, table not loaded");
            continue;
        };
        let Some(bytes) = store.read(RawArea::Data, file_name).await? else {
            tracing::warn!(table = %source, file = %file_name, "Raw table not cached");
            continue;
        };

        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::json(file_name, e))?;
        let table = RawTable::from_value(table_name(file_name), value)?;
        tracing::debug!(table = %source, records = table.len(), "Loaded raw table");
        tables.insert(*source, table);
    }

    Ok(tables)
}

/// Load every `*.json` localization file into an index
pub async fn load_localization<R: RawStore + ?Sized>(
    store: &R,
) -> Result<LocalizationIndex, AppError> {
    let mut index = LocalizationIndex::new();

    for file_name in store.list(RawArea::Langs).await? {
        if !file_name.ends_with(".json") {
            continue;
        }
        let Some(bytes) = store.read(RawArea::Langs, &file_name).await? else {
            continue;
        };

        let entries: HashMap<String, Value> =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::json(&file_name, e))?;
        let table: HashMap<String, String> = entries
            .into_iter()
            .filter_map(|(hash, text)| match text {
                Value::String(text) => Some((hash, text)),
                _ => None,
            })
            .collect();

        let code = LocalizationIndex::language_code(&file_name);
        tracing::debug!(language = %code, entries = table.len(), "Loaded text table");
        index.insert_language(code, table);
    }

    let languages: Vec<&str> = index.languages().collect();
    tracing::info!(count = index.language_count(), ?languages, "Localization loaded");
    Ok(index)
}

/// Table name used in error messages: the file stem
fn table_name(file_name: &str) -> &str {
    file_name.strip_suffix(".json").unwrap_or(file_name)
}
