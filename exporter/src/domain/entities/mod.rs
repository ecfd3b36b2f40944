//! Domain entities
//!
//! Pure data models: raw upstream tables, localization, skill depots and the
//! export records produced from them.

pub mod avatar;
pub mod export_domain;
pub mod localization;
pub mod raw;
pub mod records;
pub mod skill_depot;

pub use avatar::{AvatarKind, AvatarRecord};
pub use export_domain::{ExportDomain, LocalizationKey};
pub use localization::{LocalizationIndex, LocalizedText, TextHash};
pub use raw::{value_text, RawTable, RawTables, RecordView, SourceTable};
pub use records::{
    ArtifactPropRecord, ArtifactRecord, ArtifactSetRecord, CharacterRecord, ConstellationRecord,
    CostumeRecord, DomainRecords, FightPropRecord, Localizable, NamecardRecord, PropDigit,
    PropValue, SkillRecord, WeaponRecord,
};
pub use skill_depot::{SkillDepot, SkillDepotIndex};
