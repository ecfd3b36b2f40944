//! Export service
//!
//! Serializes every built domain and its localization projection, then hands
//! the artifacts to the sink. All artifacts are rendered before the first
//! write so a serialization failure leaves previous artifacts untouched.

use std::sync::Arc;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domain::entities::{DomainRecords, ExportDomain, Localizable, LocalizationIndex};
use crate::domain::ports::{ArtifactKind, ArtifactSink};
use crate::error::StorageError;

use super::pipeline::ExportBundle;
use super::projector::project;

/// One serialized artifact, ready to write
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedArtifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Pretty JSON with four-space indentation and raw UTF-8
pub fn to_pretty_json<T: Serialize>(name: &str, value: &T) -> Result<Vec<u8>, StorageError> {
    let mut bytes = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|e| StorageError::json(name, e))?;
    Ok(bytes)
}

/// Service writing export artifacts
pub struct ExportService<S>
where
    S: ArtifactSink,
{
    sink: Arc<S>,
}

impl<S> ExportService<S>
where
    S: ArtifactSink,
{
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }

    /// Render and write every built domain; returns the artifacts written
    pub async fn export(
        &self,
        bundle: &ExportBundle,
        index: &LocalizationIndex,
    ) -> Result<Vec<RenderedArtifact>, StorageError> {
        let artifacts = render(bundle, index)?;

        for artifact in &artifacts {
            tracing::info!(
                file = %artifact.file_name,
                kind = ?artifact.kind,
                bytes = artifact.bytes.len(),
                "Writing artifact"
            );
            self.sink
                .write(artifact.kind, &artifact.file_name, &artifact.bytes)
                .await?;
        }

        Ok(artifacts)
    }
}

/// Render all artifacts of a bundle in declaration order
pub fn render(
    bundle: &ExportBundle,
    index: &LocalizationIndex,
) -> Result<Vec<RenderedArtifact>, StorageError> {
    let mut out = Vec::new();

    for domain in ExportDomain::ALL {
        match domain {
            ExportDomain::Skills => render_localized(domain, &bundle.skills, index, &mut out)?,
            ExportDomain::Constellations => {
                render_localized(domain, &bundle.constellations, index, &mut out)?
            }
            ExportDomain::Artifacts => {
                render_localized(domain, &bundle.artifacts, index, &mut out)?
            }
            ExportDomain::ArtifactSets => {
                render_localized(domain, &bundle.artifact_sets, index, &mut out)?
            }
            ExportDomain::ArtifactProps => {
                if let Some(records) = &bundle.artifact_props {
                    out.push(render_data(domain, records)?);
                }
            }
            ExportDomain::Weapons => render_localized(domain, &bundle.weapons, index, &mut out)?,
            ExportDomain::Namecards => {
                render_localized(domain, &bundle.namecards, index, &mut out)?
            }
            ExportDomain::FightProps => {
                render_localized(domain, &bundle.fight_props, index, &mut out)?
            }
            ExportDomain::Costumes => render_localized(domain, &bundle.costumes, index, &mut out)?,
            ExportDomain::Characters => {
                render_localized(domain, &bundle.characters, index, &mut out)?
            }
        }
    }

    Ok(out)
}

fn render_data<R: Serialize>(
    domain: ExportDomain,
    records: &DomainRecords<R>,
) -> Result<RenderedArtifact, StorageError> {
    Ok(RenderedArtifact {
        kind: ArtifactKind::Data,
        file_name: domain.file_name(),
        bytes: to_pretty_json(domain.as_str(), records)?,
    })
}

fn render_localized<R: Serialize + Localizable>(
    domain: ExportDomain,
    records: &Option<DomainRecords<R>>,
    index: &LocalizationIndex,
    out: &mut Vec<RenderedArtifact>,
) -> Result<(), StorageError> {
    let Some(records) = records else {
        return Ok(());
    };

    out.push(render_data(domain, records)?);
    if let Some(key) = domain.localization() {
        let projection = project(records, key, index);
        out.push(RenderedArtifact {
            kind: ArtifactKind::Localization,
            file_name: domain.file_name(),
            bytes: to_pretty_json(domain.as_str(), &projection)?,
        });
    }
    Ok(())
}
