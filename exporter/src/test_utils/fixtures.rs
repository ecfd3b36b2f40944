//! Test fixtures
//!
//! Factory functions for raw rows and a small but complete upstream dataset:
//! one standard avatar, one player avatar with two usable depots, and a
//! handful of records for every other table.

use serde_json::{json, Value};

use crate::app::{CostumeColumnHint, SourceSettings};
use crate::domain::entities::{RawTable, RawTables, SourceTable};

use super::mocks::InMemoryUpstream;

pub const DATA_FOLDER: &str = "ExcelBinOutput";
pub const LANG_FOLDER: &str = "TextMap";

/// Build a raw table from a JSON array literal
pub fn table(name: &str, rows: Value) -> RawTable {
    RawTable::from_value(name, rows).unwrap()
}

/// A skill with an icon; `nameTextMapHash` is derived from the id
pub fn skill_row(id: i64, cost_elem_type: &str) -> Value {
    json!({
        "id": id,
        "nameTextMapHash": id * 10,
        "skillIcon": format!("Skill_S_{}", id),
        "costElemType": cost_elem_type,
    })
}

pub fn depot_row(id: i64, skills: &[i64], talents: &[i64], energy_skill: Option<i64>) -> Value {
    json!({
        "id": id,
        "skills": skills,
        "talents": talents,
        "energySkill": energy_skill,
    })
}

/// A standard avatar bound to one depot
pub fn avatar_row(id: i64, skill_depot_id: i64, icon_name: &str) -> Value {
    json!({
        "id": id,
        "skillDepotId": skill_depot_id,
        "iconName": icon_name,
        "sideIconName": icon_name.replace("UI_AvatarIcon_", "UI_AvatarIcon_Side_"),
        "qualityType": "QUALITY_ORANGE",
        "nameTextMapHash": id + 1,
    })
}

/// A player avatar choosing between candidate depots
pub fn player_row(id: i64, icon_name: &str, cand_skill_depot_ids: &[i64]) -> Value {
    let mut row = avatar_row(id, 504, icon_name);
    row["candSkillDepotIds"] = json!(cand_skill_depot_ids);
    row
}

/// Upstream filename, table name and rows of every source table
pub fn sample_files() -> Vec<(SourceTable, &'static str, Value)> {
    let mut conditional = skill_row(10013, "");
    conditional["forceCanDoSkill"] = json!(true);

    vec![
        (
            SourceTable::Avatar,
            "AvatarExcelConfigData.json",
            json!([
                avatar_row(10000002, 201, "UI_AvatarIcon_Ayaka"),
                player_row(10000005, "UI_AvatarIcon_PlayerBoy", &[504, 506, 101]),
                avatar_row(10000001, 201, "UI_AvatarIcon_Kate"),
            ]),
        ),
        (
            SourceTable::SkillDepot,
            "AvatarSkillDepotExcelConfigData.json",
            json!([
                depot_row(101, &[], &[], None),
                depot_row(201, &[10024, 10018, 10013, 0], &[21, 22, 0], Some(10019)),
                depot_row(504, &[100540, 10067], &[41], Some(10068)),
                depot_row(506, &[100540], &[61], Some(10069)),
            ]),
        ),
        (
            SourceTable::Skills,
            "AvatarSkillExcelConfigData.json",
            json!([
                skill_row(10024, ""),
                skill_row(10018, ""),
                conditional,
                skill_row(10019, "Ice"),
                skill_row(100540, ""),
                skill_row(10067, ""),
                skill_row(10068, "Wind"),
                skill_row(10069, "Rock"),
                {"id": 10070, "nameTextMapHash": 1, "skillIcon": ""},
            ]),
        ),
        (
            SourceTable::Talents,
            "AvatarTalentExcelConfigData.json",
            json!([
                {"talentId": 21, "nameTextMapHash": 2101, "icon": "UI_Talent_S_Ayaka_01"},
                {"talentId": 22, "nameTextMapHash": 2201, "icon": "UI_Talent_S_Ayaka_02"},
            ]),
        ),
        (
            SourceTable::Artifacts,
            "ReliquaryExcelConfigData.json",
            json!([{
                "id": 23334,
                "nameTextMapHash": 3001,
                "itemType": "ITEM_RELIQUARY",
                "equipType": "EQUIP_BRACER",
                "icon": "UI_RelicIcon_15003_4",
                "rankLevel": 4,
                "mainPropDepotId": 1000,
                "appendPropDepotId": 401,
            }]),
        ),
        (
            SourceTable::Weapons,
            "WeaponExcelConfigData.json",
            json!([{
                "id": 11101,
                "nameTextMapHash": 7,
                "icon": "UI_EquipIcon_Sword_Blunt",
                "awakenIcon": "UI_EquipIcon_Sword_Blunt_Awaken",
                "rankLevel": 1,
            }]),
        ),
        (
            SourceTable::FightProps,
            "ManualTextMapConfigData.json",
            json!([
                {"textMapId": "FIGHT_PROP_HP", "textMapContentTextMapHash": 111},
                {"textMapId": "UI_GACHA_SHOP", "textMapContentTextMapHash": 5},
            ]),
        ),
        (
            SourceTable::Namecards,
            "MaterialExcelConfigData.json",
            json!([
                {
                    "id": 210001,
                    "nameTextMapHash": 4001,
                    "icon": "UI_NameCardIcon_0",
                    "picPath": ["UI_NameCardPic_0_Alpha", "UI_NameCardPic_0_P"],
                    "rankLevel": 4,
                    "materialType": "MATERIAL_NAMECARD",
                },
                {"id": 101, "materialType": "MATERIAL_EXP_FRUIT"},
            ]),
        ),
        (
            SourceTable::ArtifactSets,
            "EquipAffixExcelConfigData.json",
            json!([
                {"affixId": 215001, "nameTextMapHash": 5001, "openConfig": "Relic_GladiatorsFinale_2"},
                {"affixId": 111501, "nameTextMapHash": 5002, "openConfig": "Weapon_Sword_Blunt"},
            ]),
        ),
        (
            SourceTable::Costumes,
            "AvatarCostumeExcelConfigData.json",
            json!([
                {
                    "costumeId": 200301,
                    "iconName": "UI_AvatarIcon_AyakaCostumeFruhling",
                    "sideIconName": "UI_AvatarIcon_Side_AyakaCostumeFruhling",
                    "nameTextMapHash": 6001,
                },
                {
                    "costumeId": 200300,
                    "iconName": "",
                    "sideIconName": "",
                    "nameTextMapHash": 6000,
                },
            ]),
        ),
        (
            SourceTable::ArtifactPropsMain,
            "ReliquaryMainPropExcelConfigData.json",
            json!([
                {"id": 10001, "propType": "FIGHT_PROP_HP", "propValue": 717.0},
                {"id": 10002, "propType": "FIGHT_PROP_CRITICAL", "propValue": 0.046},
            ]),
        ),
        (
            SourceTable::ArtifactPropsSub,
            "ReliquaryAffixExcelConfigData.json",
            json!([
                {"id": 501021, "propType": "FIGHT_PROP_HP_PERCENT", "propValue": 0.0408},
            ]),
        ),
    ]
}

/// Every sample table, loaded
pub fn sample_tables() -> RawTables {
    let mut tables = RawTables::new();
    for (source, file_name, rows) in sample_files() {
        let name = file_name.trim_end_matches(".json");
        tables.insert(source, table(name, rows));
    }
    tables
}

/// Localization text tables: (file name, hash → text)
pub fn sample_langs() -> Vec<(&'static str, Value)> {
    vec![
        (
            "TextMapEN.json",
            json!({
                "7": "Dull Blade",
                "111": "HP",
                "6001": "Springbloom Missive",
                "10000003": "Kamisato Ayaka",
            }),
        ),
        (
            "TextMapCHS.json",
            json!({
                "7": "无锋剑",
                "111": "生命值",
            }),
        ),
    ]
}

/// Configured table filenames for the sample dataset
pub fn sample_settings() -> SourceSettings {
    SourceSettings {
        data_folder: DATA_FOLDER.to_string(),
        lang_folder: LANG_FOLDER.to_string(),
        tables: sample_files()
            .into_iter()
            .map(|(source, file_name, _)| (source, Some(file_name.to_string())))
            .collect(),
        costume_hint: CostumeColumnHint::default(),
    }
}

/// An upstream serving the sample dataset with one commit
pub fn sample_upstream() -> InMemoryUpstream {
    let mut upstream = InMemoryUpstream::new().with_commit("0123456789abcdef0123", "OSRELWin5.1.0");
    for (_, file_name, rows) in sample_files() {
        let path = format!("{}/{}", DATA_FOLDER, file_name);
        upstream = upstream.with_file(&path, rows.to_string().as_bytes());
    }
    for (file_name, entries) in sample_langs() {
        let path = format!("{}/{}", LANG_FOLDER, file_name);
        upstream = upstream.with_file(&path, entries.to_string().as_bytes());
    }
    upstream
}
