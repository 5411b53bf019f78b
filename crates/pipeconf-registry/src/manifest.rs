// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeconf manifest parsing from `pipeconf.toml`-style descriptors.
//!
//! A manifest names a pipeconf and the artifacts it is built from. Behaviour
//! bindings are code, not data, so they are supplied when the manifest is
//! turned into a [`PipeconfBuildSpec`].

use std::collections::HashSet;
use std::str::FromStr;

use pipeconf_config::model::PipeconfEntryConfig;
use pipeconf_core::{ExtensionKind, PipeconfError, PipeconfId};
use serde::{Deserialize, Serialize};

use crate::builder::PipeconfBuildSpec;
use crate::bundle::BehaviourBindings;

/// Declarative description of a pipeconf.
///
/// Serializes to JSON for `pipeconf catalog --json`; parsing goes through
/// [`parse_pipeconf_manifest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipeconfManifest {
    pub id: PipeconfId,
    /// One-line summary shown by the catalog.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// `(kind, resource)` pairs in fetch order.
    pub artifacts: Vec<ArtifactDecl>,
}

/// One artifact of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactDecl {
    pub kind: ExtensionKind,
    /// Resource name handed to the artifact provider.
    pub resource: String,
}

impl PipeconfManifest {
    /// Build spec for this manifest with the given behaviours bound.
    pub fn to_build_spec(&self, behaviours: BehaviourBindings) -> PipeconfBuildSpec {
        self.artifacts
            .iter()
            .fold(PipeconfBuildSpec::new(self.id.clone()), |spec, decl| {
                spec.with_artifact(decl.kind, decl.resource.clone())
            })
            .with_behaviours(behaviours)
    }

    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.artifacts.iter().map(|a| a.resource.as_str())
    }
}

impl TryFrom<&PipeconfEntryConfig> for PipeconfManifest {
    type Error = PipeconfError;

    fn try_from(entry: &PipeconfEntryConfig) -> Result<Self, Self::Error> {
        let manifest = PipeconfManifest {
            id: PipeconfId::new(entry.id.clone())?,
            description: String::new(),
            artifacts: entry
                .artifacts
                .iter()
                .map(|a| ArtifactDecl {
                    kind: a.kind,
                    resource: a.resource.clone(),
                })
                .collect(),
        };
        validate(&manifest)?;
        Ok(manifest)
    }
}

/// Intermediate TOML deserialization struct.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    pipeconf: PipeconfSection,
}

/// The `[pipeconf]` section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PipeconfSection {
    id: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    artifacts: Vec<ArtifactSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArtifactSection {
    kind: String,
    resource: String,
}

/// Parse a pipeconf manifest from TOML content.
///
/// The id must be non-empty, every kind must be a known [`ExtensionKind`]
/// declared at most once, and a `P4InfoText` artifact must be present.
pub fn parse_pipeconf_manifest(toml_content: &str) -> Result<PipeconfManifest, PipeconfError> {
    let file: ManifestFile = toml::from_str(toml_content)
        .map_err(|e| PipeconfError::Config(format!("invalid pipeconf manifest: {e}")))?;
    let section = file.pipeconf;

    let id = PipeconfId::new(section.id)
        .map_err(|_| PipeconfError::Config("pipeconf manifest: id must not be empty".to_string()))?;

    let artifacts = section
        .artifacts
        .into_iter()
        .map(|a| {
            let kind = ExtensionKind::from_str(&a.kind).map_err(|_| {
                PipeconfError::Config(format!(
                    "pipeconf manifest: invalid artifact kind '{}'. Expected one of: P4InfoText, CpuPortTxt, StratumFpmBin, Bmv2Json, TofinoBin, TofinoContextJson, RawDeviceConfig",
                    a.kind
                ))
            })?;
            Ok(ArtifactDecl {
                kind,
                resource: a.resource,
            })
        })
        .collect::<Result<Vec<_>, PipeconfError>>()?;

    let manifest = PipeconfManifest {
        id,
        description: section.description,
        artifacts,
    };
    validate(&manifest)?;
    Ok(manifest)
}

fn validate(manifest: &PipeconfManifest) -> Result<(), PipeconfError> {
    let mut kinds = HashSet::new();
    for decl in &manifest.artifacts {
        if decl.resource.trim().is_empty() {
            return Err(PipeconfError::Config(format!(
                "pipeconf manifest {}: {} resource must not be empty",
                manifest.id, decl.kind
            )));
        }
        if !kinds.insert(decl.kind) {
            return Err(PipeconfError::Config(format!(
                "pipeconf manifest {}: {} declared more than once",
                manifest.id, decl.kind
            )));
        }
    }
    if !kinds.contains(&ExtensionKind::PIPELINE_DESCRIPTION) {
        return Err(PipeconfError::Config(format!(
            "pipeconf manifest {}: missing {} artifact",
            manifest.id,
            ExtensionKind::PIPELINE_DESCRIPTION
        )));
    }
    Ok(())
}
