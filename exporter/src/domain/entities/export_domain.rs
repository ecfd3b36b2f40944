//! Export domain catalogue
//!
//! The fixed set of output categories, their artifact file names, the raw
//! tables each one is built from and the stages it depends on.

use super::raw::SourceTable;

/// How a domain's localization artifact is keyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalizationKey {
    /// Keyed by the record's `nameTextMapHash`
    TextHash,
    /// Keyed by the record's own key
    RecordKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportDomain {
    Skills,
    Constellations,
    Artifacts,
    ArtifactSets,
    ArtifactProps,
    Weapons,
    Namecards,
    FightProps,
    Costumes,
    Characters,
}

impl ExportDomain {
    /// Declaration order; also the tie-break order of the stage graph
    pub const ALL: [ExportDomain; 10] = [
        ExportDomain::Skills,
        ExportDomain::Constellations,
        ExportDomain::Artifacts,
        ExportDomain::ArtifactSets,
        ExportDomain::ArtifactProps,
        ExportDomain::Weapons,
        ExportDomain::Namecards,
        ExportDomain::FightProps,
        ExportDomain::Costumes,
        ExportDomain::Characters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportDomain::Skills => "skills",
            ExportDomain::Constellations => "constellations",
            ExportDomain::Artifacts => "artifacts",
            ExportDomain::ArtifactSets => "artifact_sets",
            ExportDomain::ArtifactProps => "artifact_props",
            ExportDomain::Weapons => "weapons",
            ExportDomain::Namecards => "namecards",
            ExportDomain::FightProps => "fight_props",
            ExportDomain::Costumes => "costumes",
            ExportDomain::Characters => "characters",
        }
    }

    /// Artifact file name, shared by the data and localization artifacts
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }

    /// Localization keying, `None` for domains without display text
    pub fn localization(&self) -> Option<LocalizationKey> {
        match self {
            ExportDomain::ArtifactProps => None,
            ExportDomain::FightProps => Some(LocalizationKey::RecordKey),
            _ => Some(LocalizationKey::TextHash),
        }
    }

    /// Raw tables the stage reads
    pub fn source_tables(&self) -> &'static [SourceTable] {
        match self {
            ExportDomain::Skills => &[SourceTable::Skills],
            ExportDomain::Constellations => &[SourceTable::Talents],
            ExportDomain::Artifacts => &[SourceTable::Artifacts],
            ExportDomain::ArtifactSets => &[SourceTable::ArtifactSets],
            ExportDomain::ArtifactProps => &[
                SourceTable::ArtifactPropsMain,
                SourceTable::ArtifactPropsSub,
            ],
            ExportDomain::Weapons => &[SourceTable::Weapons],
            ExportDomain::Namecards => &[SourceTable::Namecards],
            ExportDomain::FightProps => &[SourceTable::FightProps],
            ExportDomain::Costumes => &[SourceTable::Costumes],
            ExportDomain::Characters => &[SourceTable::Avatar, SourceTable::SkillDepot],
        }
    }

    /// Stages that must complete before this one
    pub fn depends_on(&self) -> &'static [ExportDomain] {
        match self {
            ExportDomain::Characters => &[ExportDomain::Skills, ExportDomain::Costumes],
            _ => &[],
        }
    }
}

impl std::fmt::Display for ExportDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
