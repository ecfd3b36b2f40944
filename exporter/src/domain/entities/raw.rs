//! Raw configuration tables
//!
//! Upstream tables are JSON arrays of loosely typed objects. They are kept as
//! ordered `serde_json` maps and read through [`RecordView`], which turns
//! absent or mistyped fields into [`ExportError`]s naming the table.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::TextHash;
use crate::error::ExportError;

/// A single raw record, field order preserved from the source file
pub type RawRecord = Map<String, Value>;

/// The upstream tables this exporter knows how to consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTable {
    Avatar,
    SkillDepot,
    Skills,
    Talents,
    Artifacts,
    Weapons,
    FightProps,
    Namecards,
    ArtifactSets,
    Costumes,
    ArtifactPropsMain,
    ArtifactPropsSub,
}

impl SourceTable {
    /// All tables, in download order
    pub const ALL: [SourceTable; 12] = [
        SourceTable::Avatar,
        SourceTable::SkillDepot,
        SourceTable::Skills,
        SourceTable::Talents,
        SourceTable::Artifacts,
        SourceTable::Weapons,
        SourceTable::FightProps,
        SourceTable::Namecards,
        SourceTable::ArtifactSets,
        SourceTable::Costumes,
        SourceTable::ArtifactPropsMain,
        SourceTable::ArtifactPropsSub,
    ];

    /// Environment variable holding the upstream filename for this table
    pub fn env_key(&self) -> &'static str {
        match self {
            SourceTable::Avatar => "AVATAR",
            SourceTable::SkillDepot => "SKILLDEPOT",
            SourceTable::Skills => "SKILLS",
            SourceTable::Talents => "TALENTS",
            SourceTable::Artifacts => "ARTIFACTS",
            SourceTable::Weapons => "WEAPONS",
            SourceTable::FightProps => "FIGHT_PROPS",
            SourceTable::Namecards => "NAMECARDS",
            SourceTable::ArtifactSets => "ARTIFACTS_SETS",
            SourceTable::Costumes => "COSTUME",
            SourceTable::ArtifactPropsMain => "ARTIFACT_PROPS_MAIN",
            SourceTable::ArtifactPropsSub => "ARTIFACT_PROPS_SUB",
        }
    }
}

impl std::fmt::Display for SourceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.env_key())
    }
}

/// One loaded table: its name (for error messages) and its records
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub name: String,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    /// Build a table from a parsed JSON document, which must be an array of objects
    pub fn from_value(name: impl Into<String>, value: Value) -> Result<Self, ExportError> {
        let name = name.into();
        let Value::Array(items) = value else {
            return Err(ExportError::invalid_field(&name, "<root>", "array"));
        };

        let records = items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map),
                _ => Err(ExportError::invalid_field(&name, "<record>", "object")),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records wrapped in a [`RecordView`]
    pub fn views(&self) -> impl Iterator<Item = RecordView<'_>> {
        self.records
            .iter()
            .map(|record| RecordView::new(&self.name, record))
    }
}

/// The set of raw tables loaded for one run
#[derive(Debug, Default)]
pub struct RawTables {
    tables: HashMap<SourceTable, RawTable>,
}

impl RawTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: SourceTable, table: RawTable) {
        self.tables.insert(source, table);
    }

    pub fn get(&self, source: SourceTable) -> Option<&RawTable> {
        self.tables.get(&source)
    }

    pub fn contains(&self, source: SourceTable) -> bool {
        self.tables.contains_key(&source)
    }

    #[cfg(test)]
    pub fn remove(&mut self, source: SourceTable) -> Option<RawTable> {
        self.tables.remove(&source)
    }
}

/// Typed read access to one raw record
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    table: &'a str,
    record: &'a RawRecord,
}

impl<'a> RecordView<'a> {
    pub fn new(table: &'a str, record: &'a RawRecord) -> Self {
        Self { table, record }
    }

    pub fn table(&self) -> &'a str {
        self.table
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.record.iter()
    }

    /// Field value, treating JSON `null` as absent
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.record.get(field).filter(|v| !v.is_null())
    }

    fn require(&self, field: &str) -> Result<&'a Value, ExportError> {
        self.get(field)
            .ok_or_else(|| ExportError::missing_field(self.table, field))
    }

    pub fn i64(&self, field: &str) -> Result<i64, ExportError> {
        self.require(field)?
            .as_i64()
            .ok_or_else(|| ExportError::invalid_field(self.table, field, "integer"))
    }

    pub fn opt_i64(&self, field: &str) -> Result<Option<i64>, ExportError> {
        match self.get(field) {
            None => Ok(None),
            Some(v) => v
                .as_i64()
                .map(Some)
                .ok_or_else(|| ExportError::invalid_field(self.table, field, "integer")),
        }
    }

    pub fn f64_or_zero(&self, field: &str) -> Result<f64, ExportError> {
        match self.get(field) {
            None => Ok(0.0),
            Some(v) => v
                .as_f64()
                .ok_or_else(|| ExportError::invalid_field(self.table, field, "number")),
        }
    }

    pub fn string(&self, field: &str) -> Result<String, ExportError> {
        self.require(field)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ExportError::invalid_field(self.table, field, "string"))
    }

    /// String field, empty when absent
    pub fn string_or_default(&self, field: &str) -> Result<String, ExportError> {
        match self.get(field) {
            None => Ok(String::new()),
            Some(v) => v
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ExportError::invalid_field(self.table, field, "string")),
        }
    }

    pub fn text_hash(&self, field: &str) -> Result<TextHash, ExportError> {
        match self.require(field)? {
            Value::String(s) => Ok(TextHash::Text(s.clone())),
            v => v
                .as_i64()
                .map(TextHash::Number)
                .ok_or_else(|| ExportError::invalid_field(self.table, field, "text hash")),
        }
    }

    pub fn i64_list(&self, field: &str) -> Result<Vec<i64>, ExportError> {
        let Value::Array(items) = self.require(field)? else {
            return Err(ExportError::invalid_field(self.table, field, "array"));
        };
        items
            .iter()
            .map(|v| {
                v.as_i64()
                    .ok_or_else(|| ExportError::invalid_field(self.table, field, "integer array"))
            })
            .collect()
    }

    pub fn string_list(&self, field: &str) -> Result<Vec<String>, ExportError> {
        let Value::Array(items) = self.require(field)? else {
            return Err(ExportError::invalid_field(self.table, field, "array"));
        };
        items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ExportError::invalid_field(self.table, field, "string array"))
            })
            .collect()
    }

    /// Scalar field rendered as text: strings verbatim, numbers and booleans
    /// in their JSON spelling. Arrays and objects have no text form.
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).and_then(value_text)
    }
}

/// Text form of a scalar JSON value
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
