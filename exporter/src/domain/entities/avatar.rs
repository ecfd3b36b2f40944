//! Avatar source records
//!
//! Playable characters as read from the avatar table. Player-controlled
//! avatars carry a list of candidate depots instead of a single one.

use super::TextHash;
use super::raw::RecordView;
use super::skill_depot::EMPTY_DEPOT_ID;
use crate::error::ExportError;

const PLACEHOLDER_ICON_SUFFIX: &str = "_Kate";
const TEST_AVATAR_ID_PREFIX: &str = "11";
const PLAYER_ICON_SUFFIXES: [&str; 2] = ["_PlayerBoy", "_PlayerGirl"];

/// How an avatar's skills are linked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarKind {
    /// Player-controlled: one character variant per candidate depot
    Player,
    /// Single fixed depot
    Standard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvatarRecord {
    pub id: i64,
    pub skill_depot_id: i64,
    pub cand_skill_depot_ids: Vec<i64>,
    pub icon_name: String,
    pub side_icon_name: String,
    pub quality_type: String,
    pub name_text_map_hash: TextHash,
}

impl AvatarRecord {
    pub fn from_record(view: &RecordView<'_>) -> Result<Self, ExportError> {
        let cand_skill_depot_ids = match view.get("candSkillDepotIds") {
            Some(_) => view.i64_list("candSkillDepotIds")?,
            None => Vec::new(),
        };

        Ok(Self {
            id: view.i64("id")?,
            skill_depot_id: view.i64("skillDepotId")?,
            cand_skill_depot_ids,
            icon_name: view.string("iconName")?,
            side_icon_name: view.string("sideIconName")?,
            quality_type: view.string("qualityType")?,
            name_text_map_hash: view.text_hash("nameTextMapHash")?,
        })
    }

    /// Placeholder and test avatars never become characters
    pub fn is_excluded(&self) -> bool {
        self.skill_depot_id == EMPTY_DEPOT_ID
            || self.icon_name.ends_with(PLACEHOLDER_ICON_SUFFIX)
            || self.id.to_string().starts_with(TEST_AVATAR_ID_PREFIX)
    }

    pub fn kind(&self) -> AvatarKind {
        if PLAYER_ICON_SUFFIXES
            .iter()
            .any(|suffix| self.icon_name.ends_with(suffix))
        {
            AvatarKind::Player
        } else {
            AvatarKind::Standard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RawTable;
    use serde_json::json;

    fn avatar(value: serde_json::Value) -> AvatarRecord {
        let table = RawTable::from_value("AvatarExcelConfigData", json!([value])).unwrap();
        let view = table.views().next().unwrap();
        AvatarRecord::from_record(&view).unwrap()
    }

    fn base(id: i64, depot: i64, icon: &str) -> serde_json::Value {
        json!({
            "id": id, "skillDepotId": depot, "iconName": icon,
            "sideIconName": "", "qualityType": "QUALITY_PURPLE", "nameTextMapHash": 1
        })
    }

    #[test]
    fn test_avatar_ids_are_excluded() {
        assert!(avatar(base(11000001, 201, "UI_AvatarIcon_Test")).is_excluded());
    }

    #[test]
    fn empty_depot_is_excluded() {
        assert!(avatar(base(10000020, 101, "UI_AvatarIcon_Razor")).is_excluded());
    }

    #[test]
    fn placeholder_icon_is_excluded() {
        assert!(avatar(base(10000001, 201, "UI_AvatarIcon_Kate")).is_excluded());
    }

    #[test]
    fn regular_avatar_is_kept() {
        let a = avatar(base(10000002, 201, "UI_AvatarIcon_Ayaka"));
        assert!(!a.is_excluded());
        assert_eq!(a.kind(), AvatarKind::Standard);
        assert!(a.cand_skill_depot_ids.is_empty());
    }

    #[test]
    fn player_avatars_detected_by_icon_suffix() {
        let mut boy = base(10000005, 504, "UI_AvatarIcon_PlayerBoy");
        boy["candSkillDepotIds"] = json!([501, 502]);
        let boy = avatar(boy);
        assert_eq!(boy.kind(), AvatarKind::Player);
        assert_eq!(boy.cand_skill_depot_ids, vec![501, 502]);

        let girl = avatar(base(10000007, 704, "UI_AvatarIcon_PlayerGirl"));
        assert_eq!(girl.kind(), AvatarKind::Player);
    }
}
