//! Localization projector
//!
//! Re-keys localization text by a domain's identifiers, producing the
//! localization artifact that ships next to each data artifact.

use indexmap::IndexMap;

use crate::domain::entities::{
    DomainRecords, Localizable, LocalizationIndex, LocalizationKey, LocalizedText,
};

/// Localization artifact content: key → language → text
pub type Projection = IndexMap<String, LocalizedText>;

/// Project a domain's text through the localization index.
///
/// With [`LocalizationKey::TextHash`] records sharing a hash collapse into
/// one entry, placed where the hash first appears.
pub fn project<R: Localizable>(
    records: &DomainRecords<R>,
    key: LocalizationKey,
    index: &LocalizationIndex,
) -> Projection {
    let mut projection = Projection::with_capacity(records.len());
    for (record_key, record) in records {
        let hash = record.text_hash().key();
        let entry_key = match key {
            LocalizationKey::TextHash => hash.clone(),
            LocalizationKey::RecordKey => record_key.clone(),
        };
        projection
            .entry(entry_key)
            .or_insert_with(|| index.resolve(&hash));
    }
    projection
}
