//! Export records
//!
//! One struct per export domain. Field names serialize in camelCase to match
//! the artifacts consumed downstream; field order is the artifact order.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::TextHash;

/// Records of one export domain, keyed by the domain's identifier and kept
/// in raw source order. Re-inserting a key keeps its original position.
pub type DomainRecords<R> = IndexMap<String, R>;

/// A record carrying display text that can be localized
pub trait Localizable {
    fn text_hash(&self) -> &TextHash;
}

macro_rules! impl_localizable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Localizable for $ty {
                fn text_hash(&self) -> &TextHash {
                    &self.name_text_map_hash
                }
            }
        )*
    };
}

/// Serialize an absent group id as `""`
fn int_or_empty<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_i64(*v),
        None => serializer.serialize_str(""),
    }
}

/// Skill export record.
///
/// `force_can_do_skill` and `cost_elem_type` only feed the character linker
/// and never reach the artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecord {
    pub name_text_map_hash: TextHash,
    pub skill_icon: String,
    #[serde(skip_serializing)]
    pub force_can_do_skill: Option<serde_json::Value>,
    #[serde(skip_serializing)]
    pub cost_elem_type: String,
    #[serde(serialize_with = "int_or_empty")]
    pub proud_skill_group_id: Option<i64>,
}

impl SkillRecord {
    /// Conditional skills are not part of an avatar's base kit
    pub fn is_conditional(&self) -> bool {
        self.force_can_do_skill.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstellationRecord {
    pub name_text_map_hash: TextHash,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    pub name_text_map_hash: TextHash,
    pub item_type: String,
    pub equip_type: String,
    pub icon: String,
    pub rank_level: i64,
    pub main_prop_depot_id: i64,
    pub append_prop_depot_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSetRecord {
    pub affix_id: i64,
    pub name_text_map_hash: TextHash,
}

/// How an artifact property value is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropDigit {
    Percent,
    Digit,
}

/// Artifact property value: one decimal for percentages, whole for digits
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Percent(f64),
    Digit(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactPropRecord {
    pub prop_type: String,
    pub prop_digit: PropDigit,
    pub prop_value: PropValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponRecord {
    pub name_text_map_hash: TextHash,
    pub icon: String,
    pub awaken_icon: String,
    pub rank_level: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamecardRecord {
    pub name_text_map_hash: TextHash,
    pub icon: String,
    pub pic_path: Vec<String>,
    pub rank_level: i64,
    pub material_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FightPropRecord {
    pub name_text_map_hash: TextHash,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostumeRecord {
    pub icon_name: String,
    pub side_icon_name: String,
    pub name_text_map_hash: TextHash,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub name_text_map_hash: TextHash,
    pub icon_name: String,
    pub side_icon_name: String,
    pub quality_type: String,
    pub cost_elem_type: String,
    pub skills: Vec<i64>,
    pub talents: Vec<i64>,
}

impl_localizable!(
    SkillRecord,
    ConstellationRecord,
    ArtifactRecord,
    ArtifactSetRecord,
    WeaponRecord,
    NamecardRecord,
    FightPropRecord,
    CostumeRecord,
    CharacterRecord,
);
