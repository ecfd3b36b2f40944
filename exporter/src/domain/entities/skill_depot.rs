//! Skill depots
//!
//! A depot bundles the skill and talent ids assignable to an avatar. Depot
//! 101 is the reserved empty depot; it stays in the index and is rejected
//! by the consumers.

use std::collections::HashMap;

use super::raw::{RawTable, RecordView};
use crate::error::ExportError;

/// Id of the reserved empty/default depot
pub const EMPTY_DEPOT_ID: i64 = 101;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDepot {
    pub id: i64,
    /// Skill ids in depot order; non-positive entries mean "no skill"
    pub skills: Vec<i64>,
    /// Talent ids in depot order; same sentinel convention as `skills`
    pub talents: Vec<i64>,
    pub energy_skill: Option<i64>,
}

impl SkillDepot {
    pub fn from_record(view: &RecordView<'_>) -> Result<Self, ExportError> {
        Ok(Self {
            id: view.i64("id")?,
            skills: view.i64_list("skills")?,
            talents: view.i64_list("talents")?,
            energy_skill: view.opt_i64("energySkill")?,
        })
    }

    pub fn is_reserved(&self) -> bool {
        self.id == EMPTY_DEPOT_ID
    }

    pub fn active_skills(&self) -> impl Iterator<Item = i64> + '_ {
        self.skills.iter().copied().filter(|id| *id > 0)
    }

    pub fn active_talents(&self) -> Vec<i64> {
        self.talents.iter().copied().filter(|id| *id > 0).collect()
    }
}

/// Depot id → depot
#[derive(Debug, Clone, Default)]
pub struct SkillDepotIndex {
    depots: HashMap<i64, SkillDepot>,
}

impl SkillDepotIndex {
    pub fn from_table(table: &RawTable) -> Result<Self, ExportError> {
        let mut depots = HashMap::with_capacity(table.len());
        for view in table.views() {
            let depot = SkillDepot::from_record(&view)?;
            tracing::debug!(depot_id = depot.id, "Indexed skill depot");
            depots.insert(depot.id, depot);
        }
        Ok(Self { depots })
    }

    pub fn get(&self, id: i64) -> Option<&SkillDepot> {
        self.depots.get(&id)
    }

    /// Depot usable by an avatar: present and not the reserved empty depot
    pub fn usable(&self, id: i64) -> Option<&SkillDepot> {
        self.get(id).filter(|depot| !depot.is_reserved())
    }

    pub fn len(&self) -> usize {
        self.depots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depots.is_empty()
    }
}
