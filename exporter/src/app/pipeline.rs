//! Export pipeline
//!
//! Runs one stage per export domain in dependency order. A stage whose raw
//! tables or upstream stages are unavailable is skipped and its domain is
//! left out of the bundle; a stage that fails aborts the whole run.

use std::collections::HashSet;

use crate::domain::entities::{
    ArtifactPropRecord, ArtifactRecord, ArtifactSetRecord, CharacterRecord, ConstellationRecord,
    CostumeRecord, DomainRecords, ExportDomain, FightPropRecord, NamecardRecord, RawTable,
    RawTables, SkillDepotIndex, SkillRecord, SourceTable, WeaponRecord,
};
use crate::error::ExportError;

use super::character_linker::CharacterLinker;
use super::costume::{normalize_costumes, CostumeColumnHint};
use super::normalizers::{
    normalize_artifact_props, normalize_artifact_sets, normalize_artifacts,
    normalize_constellations, normalize_fight_props, normalize_namecards, normalize_skills,
    normalize_weapons,
};

/// Every domain built during one run
#[derive(Debug, Default)]
pub struct ExportBundle {
    pub skills: Option<DomainRecords<SkillRecord>>,
    pub constellations: Option<DomainRecords<ConstellationRecord>>,
    pub artifacts: Option<DomainRecords<ArtifactRecord>>,
    pub artifact_sets: Option<DomainRecords<ArtifactSetRecord>>,
    pub artifact_props: Option<DomainRecords<ArtifactPropRecord>>,
    pub weapons: Option<DomainRecords<WeaponRecord>>,
    pub namecards: Option<DomainRecords<NamecardRecord>>,
    pub fight_props: Option<DomainRecords<FightPropRecord>>,
    pub costumes: Option<DomainRecords<CostumeRecord>>,
    pub characters: Option<DomainRecords<CharacterRecord>>,
}

impl ExportBundle {
    /// Number of records of a built domain, `None` when the stage was skipped
    pub fn record_count(&self, domain: ExportDomain) -> Option<usize> {
        match domain {
            ExportDomain::Skills => self.skills.as_ref().map(|r| r.len()),
            ExportDomain::Constellations => self.constellations.as_ref().map(|r| r.len()),
            ExportDomain::Artifacts => self.artifacts.as_ref().map(|r| r.len()),
            ExportDomain::ArtifactSets => self.artifact_sets.as_ref().map(|r| r.len()),
            ExportDomain::ArtifactProps => self.artifact_props.as_ref().map(|r| r.len()),
            ExportDomain::Weapons => self.weapons.as_ref().map(|r| r.len()),
            ExportDomain::Namecards => self.namecards.as_ref().map(|r| r.len()),
            ExportDomain::FightProps => self.fight_props.as_ref().map(|r| r.len()),
            ExportDomain::Costumes => self.costumes.as_ref().map(|r| r.len()),
            ExportDomain::Characters => self.characters.as_ref().map(|r| r.len()),
        }
    }

    pub fn is_built(&self, domain: ExportDomain) -> bool {
        self.record_count(domain).is_some()
    }
}

/// Topological order of the stages, ties broken by declaration order
pub fn stage_order() -> Result<Vec<ExportDomain>, ExportError> {
    order_stages(&ExportDomain::ALL, |domain| domain.depends_on())
}

fn order_stages<F>(stages: &[ExportDomain], depends_on: F) -> Result<Vec<ExportDomain>, ExportError>
where
    F: Fn(&ExportDomain) -> &'static [ExportDomain],
{
    let mut done: HashSet<ExportDomain> = HashSet::new();
    let mut order = Vec::with_capacity(stages.len());

    while order.len() < stages.len() {
        let next = stages
            .iter()
            .find(|stage| {
                !done.contains(*stage) && depends_on(*stage).iter().all(|d| done.contains(d))
            })
            .copied()
            .ok_or(ExportError::StageCycle)?;
        done.insert(next);
        order.push(next);
    }

    Ok(order)
}

/// Builds an [`ExportBundle`] from the raw tables of one run
pub struct Pipeline<'a> {
    tables: &'a RawTables,
    costume_hint: &'a CostumeColumnHint,
}

impl<'a> Pipeline<'a> {
    pub fn new(tables: &'a RawTables, costume_hint: &'a CostumeColumnHint) -> Self {
        Self {
            tables,
            costume_hint,
        }
    }

    pub fn run(&self) -> Result<ExportBundle, ExportError> {
        let mut bundle = ExportBundle::default();

        for domain in stage_order()? {
            if let Some(missing) = self.missing_table(domain) {
                tracing::warn!(%domain, table = %missing, "Raw table not loaded, skipping stage");
                continue;
            }
            if let Some(dep) = domain.depends_on().iter().find(|d| !bundle.is_built(**d)) {
                tracing::warn!(%domain, dependency = %dep, "Upstream stage missing, skipping stage");
                continue;
            }

            self.run_stage(domain, &mut bundle)?;
            tracing::info!(
                %domain,
                records = bundle.record_count(domain).unwrap_or_default(),
                "Stage complete"
            );
        }

        Ok(bundle)
    }

    fn missing_table(&self, domain: ExportDomain) -> Option<SourceTable> {
        domain
            .source_tables()
            .iter()
            .copied()
            .find(|table| !self.tables.contains(*table))
    }

    fn table(&self, source: SourceTable) -> Result<&'a RawTable, ExportError> {
        self.tables
            .get(source)
            .ok_or_else(|| ExportError::MissingTable(source.to_string()))
    }

    fn run_stage(&self, domain: ExportDomain, bundle: &mut ExportBundle) -> Result<(), ExportError> {
        match domain {
            ExportDomain::Skills => {
                bundle.skills = Some(normalize_skills(self.table(SourceTable::Skills)?)?);
            }
            ExportDomain::Constellations => {
                bundle.constellations =
                    Some(normalize_constellations(self.table(SourceTable::Talents)?)?);
            }
            ExportDomain::Artifacts => {
                bundle.artifacts = Some(normalize_artifacts(self.table(SourceTable::Artifacts)?)?);
            }
            ExportDomain::ArtifactSets => {
                bundle.artifact_sets =
                    Some(normalize_artifact_sets(self.table(SourceTable::ArtifactSets)?)?);
            }
            ExportDomain::ArtifactProps => {
                bundle.artifact_props = Some(normalize_artifact_props(
                    self.table(SourceTable::ArtifactPropsMain)?,
                    self.table(SourceTable::ArtifactPropsSub)?,
                )?);
            }
            ExportDomain::Weapons => {
                bundle.weapons = Some(normalize_weapons(self.table(SourceTable::Weapons)?)?);
            }
            ExportDomain::Namecards => {
                bundle.namecards = Some(normalize_namecards(self.table(SourceTable::Namecards)?)?);
            }
            ExportDomain::FightProps => {
                bundle.fight_props =
                    Some(normalize_fight_props(self.table(SourceTable::FightProps)?)?);
            }
            ExportDomain::Costumes => {
                bundle.costumes = Some(normalize_costumes(
                    self.table(SourceTable::Costumes)?,
                    self.costume_hint,
                )?);
            }
            ExportDomain::Characters => {
                let skills = bundle
                    .skills
                    .as_ref()
                    .ok_or_else(|| ExportError::MissingTable(ExportDomain::Skills.to_string()))?;
                let depots = SkillDepotIndex::from_table(self.table(SourceTable::SkillDepot)?)?;
                if depots.is_empty() {
                    tracing::warn!("Skill depot table is empty, characters will have no kit");
                }
                tracing::debug!(depots = depots.len(), "Indexed skill depots");
                let linker = CharacterLinker::new(&depots, skills);
                bundle.characters = Some(linker.link(self.table(SourceTable::Avatar)?)?);
            }
        }
        Ok(())
    }
}
