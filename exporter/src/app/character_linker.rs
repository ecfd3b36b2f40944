//! Character linker
//!
//! Joins avatar records with their skill depots and the skill export to
//! build character records. Every character record is built from scratch
//! out of the avatar and one depot; variants never share state.
//!
//! Standard avatars drop conditional skills (`forceCanDoSkill` set) from
//! their kit. Player avatars keep every depot skill.

use crate::domain::entities::{
    AvatarKind, AvatarRecord, CharacterRecord, DomainRecords, RawTable, SkillDepot,
    SkillDepotIndex, SkillRecord,
};
use crate::error::ExportError;

/// Which depot skills make it into the kit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkillFilter {
    /// Every positive skill id
    All,
    /// Positive skill ids whose skill record is not conditional
    BaseKit,
}

pub struct CharacterLinker<'a> {
    depots: &'a SkillDepotIndex,
    skills: &'a DomainRecords<SkillRecord>,
}

impl<'a> CharacterLinker<'a> {
    pub fn new(depots: &'a SkillDepotIndex, skills: &'a DomainRecords<SkillRecord>) -> Self {
        Self { depots, skills }
    }

    pub fn link(&self, avatars: &RawTable) -> Result<DomainRecords<CharacterRecord>, ExportError> {
        let mut characters = DomainRecords::new();

        for view in avatars.views() {
            let avatar = AvatarRecord::from_record(&view)?;
            if avatar.is_excluded() {
                tracing::debug!(avatar_id = avatar.id, "Skipping placeholder avatar");
                continue;
            }

            tracing::debug!(avatar_id = avatar.id, kind = ?avatar.kind(), "Linking avatar");
            match avatar.kind() {
                AvatarKind::Player => self.link_player(&avatar, &mut characters)?,
                AvatarKind::Standard => self.link_standard(&avatar, &mut characters)?,
            }
        }

        Ok(characters)
    }

    /// One record per usable candidate depot, then the "no depot selected" entry
    fn link_player(
        &self,
        avatar: &AvatarRecord,
        characters: &mut DomainRecords<CharacterRecord>,
    ) -> Result<(), ExportError> {
        for &depot_id in &avatar.cand_skill_depot_ids {
            let Some(depot) = self.depots.usable(depot_id) else {
                tracing::debug!(avatar_id = avatar.id, depot_id, "Candidate depot unusable");
                continue;
            };

            let record = self.with_kit(avatar, depot, SkillFilter::All)?;
            characters.insert(format!("{}-{}", avatar.id, depot.id), record);
        }

        characters.insert(avatar.id.to_string(), unlinked(avatar));
        Ok(())
    }

    fn link_standard(
        &self,
        avatar: &AvatarRecord,
        characters: &mut DomainRecords<CharacterRecord>,
    ) -> Result<(), ExportError> {
        let record = match self.depots.usable(avatar.skill_depot_id) {
            Some(depot) => self.with_kit(avatar, depot, SkillFilter::BaseKit)?,
            None => unlinked(avatar),
        };
        characters.insert(avatar.id.to_string(), record);
        Ok(())
    }

    fn with_kit(
        &self,
        avatar: &AvatarRecord,
        depot: &SkillDepot,
        filter: SkillFilter,
    ) -> Result<CharacterRecord, ExportError> {
        let mut skills = Vec::with_capacity(depot.skills.len() + 1);
        for skill_id in depot.active_skills() {
            if filter == SkillFilter::BaseKit && self.skill(avatar, skill_id)?.is_conditional() {
                tracing::debug!(avatar_id = avatar.id, skill_id, "Dropping conditional skill");
                continue;
            }
            skills.push(skill_id);
        }

        let mut cost_elem_type = String::new();
        if let Some((energy_id, energy)) = self.energy_skill(depot) {
            tracing::debug!(avatar_id = avatar.id, energy_id, "Resolved energy skill");
            cost_elem_type = energy.cost_elem_type.clone();
            skills.push(energy_id);
        }

        Ok(CharacterRecord {
            cost_elem_type,
            skills,
            talents: depot.active_talents(),
            ..unlinked(avatar)
        })
    }

    /// Skill export record a depot refers to; a miss means the export and the
    /// depot table disagree, which aborts the run
    fn skill(&self, avatar: &AvatarRecord, skill_id: i64) -> Result<&'a SkillRecord, ExportError> {
        self.skills
            .get(&skill_id.to_string())
            .ok_or(ExportError::MissingSkill {
                avatar_id: avatar.id,
                skill_id,
            })
    }

    fn energy_skill(&self, depot: &SkillDepot) -> Option<(i64, &'a SkillRecord)> {
        let id = depot.energy_skill?;
        self.skills.get(&id.to_string()).map(|skill| (id, skill))
    }
}

/// Character record with no depot joined
fn unlinked(avatar: &AvatarRecord) -> CharacterRecord {
    CharacterRecord {
        name_text_map_hash: avatar.name_text_map_hash.clone(),
        icon_name: avatar.icon_name.clone(),
        side_icon_name: avatar.side_icon_name.clone(),
        quality_type: avatar.quality_type.clone(),
        cost_elem_type: String::new(),
        skills: Vec::new(),
        talents: Vec::new(),
    }
}
