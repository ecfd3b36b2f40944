//! Costume normalizer
//!
//! The costume table's id and icon columns have been renamed across upstream
//! revisions. Column names are resolved once per run, in order:
//! 1. an explicit override from configuration,
//! 2. the known column names of past revisions, checked against the data,
//! 3. a value-shape scan of the records (logged as a warning).

use crate::domain::entities::{value_text, CostumeRecord, DomainRecords, RawTable, RecordView};
use crate::error::ExportError;

/// Column names of known upstream revisions: (revision, id column, icon column)
const KNOWN_COSTUME_COLUMNS: &[(&str, &str, &str)] = &[
    ("named", "costumeId", "iconName"),
    ("skin", "skinId", "frontIconName"),
];

const ICON_PREFIX: &str = "UI_AvatarIcon_";
const SIDE_ICON_PREFIX: &str = "UI_AvatarIcon_Side_";

/// Configured column names, either may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostumeColumnHint {
    pub id_field: Option<String>,
    pub icon_field: Option<String>,
}

/// Resolved column names for this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostumeColumns {
    pub id_field: String,
    /// `None` when no icon column exists; every record is then skipped
    pub icon_field: Option<String>,
}

fn looks_like_costume_id(text: &str) -> bool {
    text.starts_with('2') && text.len() == 6
}

fn looks_like_icon(text: &str) -> bool {
    text.starts_with(ICON_PREFIX) && !text.starts_with(SIDE_ICON_PREFIX)
}

impl CostumeColumns {
    /// Each configured column wins on its own; the other is matched
    /// against known revisions, then discovered from the values.
    pub fn resolve(table: &RawTable, hint: &CostumeColumnHint) -> Result<Self, ExportError> {
        if let (Some(id_field), Some(icon_field)) = (&hint.id_field, &hint.icon_field) {
            tracing::debug!(%id_field, %icon_field, "Using configured costume columns");
            return Ok(Self {
                id_field: id_field.clone(),
                icon_field: Some(icon_field.clone()),
            });
        }

        let (id_field, icon_field) = match Self::match_known(table) {
            Some((id_field, icon_field)) => (Some(id_field), Some(icon_field)),
            None => {
                let discovered = Self::discover(table);
                tracing::warn!(
                    id_field = ?discovered.0,
                    icon_field = ?discovered.1,
                    "Costume columns not recognised, falling back to value-shape discovery"
                );
                discovered
            }
        };

        let id_field = hint
            .id_field
            .clone()
            .or(id_field)
            .ok_or_else(|| ExportError::SchemaDiscovery("no costume id column".to_string()))?;
        Ok(Self {
            id_field,
            icon_field: hint.icon_field.clone().or(icon_field),
        })
    }

    /// Known revision whose columns hold values of the expected shape in the
    /// first record
    fn match_known(table: &RawTable) -> Option<(String, String)> {
        let first = table.views().next()?;
        KNOWN_COSTUME_COLUMNS
            .iter()
            .find(|(_, id_field, icon_field)| {
                let id_matches = first.text(id_field).is_some_and(|t| looks_like_costume_id(&t));
                let icon_matches = first
                    .text(icon_field)
                    .is_some_and(|t| t.is_empty() || looks_like_icon(&t));
                id_matches && icon_matches
            })
            .map(|(revision, id_field, icon_field)| {
                tracing::debug!(revision, id_field, icon_field, "Matched costume columns");
                (id_field.to_string(), icon_field.to_string())
            })
    }

    /// Scan records in order until both columns are found. Within a scanned
    /// record a later matching field replaces an earlier one.
    fn discover(table: &RawTable) -> (Option<String>, Option<String>) {
        let mut id_field = None;
        let mut icon_field = None;

        for view in table.views() {
            if id_field.is_some() && icon_field.is_some() {
                break;
            }
            for (key, value) in view.fields() {
                let Some(text) = value_text(value) else {
                    continue;
                };
                if looks_like_costume_id(&text) {
                    id_field = Some(key.clone());
                } else if looks_like_icon(&text) {
                    icon_field = Some(key.clone());
                }
            }
        }

        (id_field, icon_field)
    }
}

pub fn normalize_costumes(
    table: &RawTable,
    hint: &CostumeColumnHint,
) -> Result<DomainRecords<CostumeRecord>, ExportError> {
    let mut costumes = DomainRecords::new();
    if table.is_empty() {
        return Ok(costumes);
    }

    let columns = CostumeColumns::resolve(table, hint)?;
    let Some(icon_field) = columns.icon_field.as_deref() else {
        tracing::warn!(table = %table.name, "No costume icon column, every costume is skipped");
        return Ok(costumes);
    };

    for view in table.views() {
        let costume_id = costume_id(&view, &columns.id_field)?;
        let icon_name = view.text(icon_field).unwrap_or_default();
        if icon_name.is_empty() {
            tracing::debug!(%costume_id, "Costume has no icon, skipping");
            continue;
        }

        costumes.insert(
            costume_id,
            CostumeRecord {
                icon_name,
                side_icon_name: view.string("sideIconName")?,
                name_text_map_hash: view.text_hash("nameTextMapHash")?,
            },
        );
    }
    Ok(costumes)
}

fn costume_id(view: &RecordView<'_>, field: &str) -> Result<String, ExportError> {
    view.text(field)
        .ok_or_else(|| ExportError::missing_field(view.table(), field))
}
