//! Localization entities
//!
//! Text tables map a localization hash to display text, one table per
//! language. A hash missing from a language resolves to an empty string:
//! upstream text routinely lags behind new content.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Localization hash as it appears on raw records.
///
/// Upstream uses integers, but string hashes are accepted and passed through
/// unchanged so exported records keep their original JSON type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextHash {
    Number(i64),
    Text(String),
}

impl TextHash {
    /// Key used in text tables and localization artifacts
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for TextHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextHash::Number(n) => write!(f, "{}", n),
            TextHash::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Resolved text for one hash, by language code
pub type LocalizedText = BTreeMap<String, String>;

/// Per-language hash → text lookup
#[derive(Debug, Clone, Default)]
pub struct LocalizationIndex {
    languages: BTreeMap<String, HashMap<String, String>>,
}

impl LocalizationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Language code for a text table file name: `TextMapEN.json` → `EN`
    pub fn language_code(file_name: &str) -> String {
        let stem = file_name.split('.').next().unwrap_or(file_name);
        stem.replace("TextMap", "")
    }

    pub fn insert_language(&mut self, code: impl Into<String>, table: HashMap<String, String>) {
        self.languages.insert(code.into(), table);
    }

    /// Loaded language codes, sorted
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn language_count(&self) -> usize {
        self.languages.len()
    }

    /// Resolve a hash in every loaded language; missing entries are `""`
    pub fn resolve(&self, hash: &str) -> LocalizedText {
        self.languages
            .iter()
            .map(|(lang, table)| (lang.clone(), table.get(hash).cloned().unwrap_or_default()))
            .collect()
    }
}
