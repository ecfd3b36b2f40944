//! Record normalizers
//!
//! One pure function per export domain: read a raw table, filter it, and
//! build the domain's export records keyed by their identifier in source
//! order. Costumes live in [`super::costume`] because their column names
//! have to be resolved first.

use crate::domain::entities::{
    ArtifactPropRecord, ArtifactRecord, ArtifactSetRecord, ConstellationRecord, DomainRecords,
    FightPropRecord, NamecardRecord, PropDigit, PropValue, RawTable, SkillRecord, WeaponRecord,
};
use crate::error::ExportError;

/// Last `propType` segments displayed as percentages
const PERCENT_SUFFIXES: [&str; 5] = ["HURT", "CRITICAL", "EFFICIENCY", "PERCENT", "ADD"];

/// Artifact set configs start with this prefix
const ARTIFACT_SET_PREFIX: &str = "Relic_";
/// Misspelled prefix still present upstream
const ARTIFACT_SET_PREFIX_TYPO: &str = "Relci_";

const NAMECARD_MATERIAL: &str = "MATERIAL_NAMECARD";
const FIGHT_PROP_PREFIX: &str = "FIGHT_PROP";

pub fn normalize_skills(table: &RawTable) -> Result<DomainRecords<SkillRecord>, ExportError> {
    let mut skills = DomainRecords::new();
    for view in table.views() {
        let id = view.i64("id")?;
        let skill_icon = view.string_or_default("skillIcon")?;
        if skill_icon.is_empty() {
            tracing::debug!(skill_id = id, "Skill has no icon, skipping");
            continue;
        }

        skills.insert(
            id.to_string(),
            SkillRecord {
                name_text_map_hash: view.text_hash("nameTextMapHash")?,
                skill_icon,
                force_can_do_skill: view.get("forceCanDoSkill").cloned(),
                cost_elem_type: view.string_or_default("costElemType")?,
                proud_skill_group_id: view.opt_i64("proudSkillGroupId")?,
            },
        );
    }
    Ok(skills)
}

pub fn normalize_constellations(
    table: &RawTable,
) -> Result<DomainRecords<ConstellationRecord>, ExportError> {
    let mut constellations = DomainRecords::new();
    for view in table.views() {
        let talent_id = view.i64("talentId")?;
        tracing::debug!(talent_id, "Normalizing constellation");
        constellations.insert(
            talent_id.to_string(),
            ConstellationRecord {
                name_text_map_hash: view.text_hash("nameTextMapHash")?,
                icon: view.string("icon")?,
            },
        );
    }
    Ok(constellations)
}

pub fn normalize_artifacts(table: &RawTable) -> Result<DomainRecords<ArtifactRecord>, ExportError> {
    let mut artifacts = DomainRecords::new();
    for view in table.views() {
        let id = view.i64("id")?;
        artifacts.insert(
            id.to_string(),
            ArtifactRecord {
                name_text_map_hash: view.text_hash("nameTextMapHash")?,
                item_type: view.string("itemType")?,
                equip_type: view.string("equipType")?,
                icon: view.string("icon")?,
                rank_level: view.i64("rankLevel")?,
                main_prop_depot_id: view.i64("mainPropDepotId")?,
                append_prop_depot_id: view.i64("appendPropDepotId")?,
            },
        );
    }
    Ok(artifacts)
}

pub fn normalize_artifact_sets(
    table: &RawTable,
) -> Result<DomainRecords<ArtifactSetRecord>, ExportError> {
    let mut sets = DomainRecords::new();
    for view in table.views() {
        let affix_id = view.i64("affixId")?;
        let open_config = view.string("openConfig")?;
        if !is_artifact_set_config(&open_config) {
            continue;
        }

        tracing::debug!(affix_id, "Normalizing artifact set");
        sets.insert(
            affix_id.to_string(),
            ArtifactSetRecord {
                affix_id,
                name_text_map_hash: view.text_hash("nameTextMapHash")?,
            },
        );
    }
    Ok(sets)
}

fn is_artifact_set_config(open_config: &str) -> bool {
    open_config.starts_with(ARTIFACT_SET_PREFIX) || open_config.starts_with(ARTIFACT_SET_PREFIX_TYPO)
}

/// Artifact properties from the main table followed by the affix table
pub fn normalize_artifact_props(
    main: &RawTable,
    sub: &RawTable,
) -> Result<DomainRecords<ArtifactPropRecord>, ExportError> {
    let mut props = DomainRecords::new();
    for view in main.views().chain(sub.views()) {
        let id = view.i64("id")?;
        let prop_type = view.string("propType")?;
        let raw = view.f64_or_zero("propValue")?;
        let prop_digit = classify_prop(&prop_type);
        let prop_value = match prop_digit {
            PropDigit::Percent => PropValue::Percent(round_to(raw * 100.0, 1)),
            PropDigit::Digit => PropValue::Digit(raw.round_ties_even() as i64),
        };

        props.insert(
            id.to_string(),
            ArtifactPropRecord {
                prop_type,
                prop_digit,
                prop_value,
            },
        );
    }
    Ok(props)
}

pub fn classify_prop(prop_type: &str) -> PropDigit {
    let suffix = prop_type.rsplit('_').next().unwrap_or(prop_type);
    if PERCENT_SUFFIXES.contains(&suffix) {
        PropDigit::Percent
    } else {
        PropDigit::Digit
    }
}

/// Round at `decimals` places, deciding on the exact binary value
fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

pub fn normalize_weapons(table: &RawTable) -> Result<DomainRecords<WeaponRecord>, ExportError> {
    let mut weapons = DomainRecords::new();
    for view in table.views() {
        let id = view.i64("id")?;
        weapons.insert(
            id.to_string(),
            WeaponRecord {
                name_text_map_hash: view.text_hash("nameTextMapHash")?,
                icon: view.string("icon")?,
                awaken_icon: view.string("awakenIcon")?,
                rank_level: view.i64("rankLevel")?,
            },
        );
    }
    Ok(weapons)
}

pub fn normalize_namecards(table: &RawTable) -> Result<DomainRecords<NamecardRecord>, ExportError> {
    let mut namecards = DomainRecords::new();
    for view in table.views() {
        let is_namecard = view
            .get("materialType")
            .and_then(|v| v.as_str())
            .is_some_and(|t| t == NAMECARD_MATERIAL);
        if !is_namecard {
            continue;
        }

        let id = view.i64("id")?;
        tracing::debug!(namecard_id = id, "Normalizing namecard");
        namecards.insert(
            id.to_string(),
            NamecardRecord {
                name_text_map_hash: view.text_hash("nameTextMapHash")?,
                icon: view.string("icon")?,
                pic_path: view.string_list("picPath")?,
                rank_level: view.i64("rankLevel")?,
                material_type: NAMECARD_MATERIAL.to_string(),
            },
        );
    }
    Ok(namecards)
}

pub fn normalize_fight_props(
    table: &RawTable,
) -> Result<DomainRecords<FightPropRecord>, ExportError> {
    let mut fight_props = DomainRecords::new();
    for view in table.views() {
        let text_map_id = view.string("textMapId")?;
        if !text_map_id.starts_with(FIGHT_PROP_PREFIX) {
            continue;
        }

        fight_props.insert(
            text_map_id,
            FightPropRecord {
                name_text_map_hash: view.text_hash("textMapContentTextMapHash")?,
            },
        );
    }
    Ok(fight_props)
}
