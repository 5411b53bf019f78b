// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembles [`PipeconfBundle`]s from declared artifacts.

use std::collections::{BTreeMap, HashSet};

use pipeconf_core::{
    ArtifactProvider, ExtensionKind, PipeconfError, PipeconfId, PipelineModelParser,
};
use tracing::debug;

use crate::bundle::{BehaviourBindings, PipeconfBundle};

/// Everything needed to build one pipeconf.
#[derive(Debug, Clone)]
pub struct PipeconfBuildSpec {
    pub id: PipeconfId,
    /// Artifacts in fetch order.
    pub artifacts: Vec<(ExtensionKind, String)>,
    /// Bound into the bundle unchanged.
    pub behaviours: BehaviourBindings,
}

impl PipeconfBuildSpec {
    pub fn new(id: PipeconfId) -> Self {
        Self {
            id,
            artifacts: Vec::new(),
            behaviours: BehaviourBindings::none(),
        }
    }

    pub fn with_artifact(mut self, kind: ExtensionKind, resource: impl Into<String>) -> Self {
        self.artifacts.push((kind, resource.into()));
        self
    }

    pub fn with_behaviours(mut self, behaviours: BehaviourBindings) -> Self {
        self.behaviours = behaviours;
        self
    }
}

/// Validates a [`PipeconfBuildSpec`] and turns it into a bundle.
///
/// The builder only reads from the provider; it holds no state of its own.
pub struct PipeconfBuilder<'a> {
    parser: &'a dyn PipelineModelParser,
    provider: &'a dyn ArtifactProvider,
}

impl<'a> PipeconfBuilder<'a> {
    pub fn new(parser: &'a dyn PipelineModelParser, provider: &'a dyn ArtifactProvider) -> Self {
        Self { parser, provider }
    }

    /// Build the bundle described by `spec`.
    ///
    /// Fails on the first missing artifact, on a missing or unparsable
    /// pipeline description, or on a kind declared twice. No bundle is
    /// produced on failure.
    pub fn build(&self, spec: &PipeconfBuildSpec) -> Result<PipeconfBundle, PipeconfError> {
        check_declared_kinds(spec)?;

        let mut extensions = BTreeMap::new();
        for (kind, resource) in &spec.artifacts {
            let bytes = self.provider.fetch(resource).ok_or_else(|| {
                PipeconfError::ArtifactMissing {
                    resource: resource.clone(),
                }
            })?;
            debug!(pipeconf = %spec.id, %kind, resource, len = bytes.len(), "artifact fetched");
            extensions.insert(*kind, bytes);
        }

        let description = extensions
            .get(&ExtensionKind::PIPELINE_DESCRIPTION)
            .ok_or_else(|| {
                PipeconfError::Internal(format!(
                    "{}: pipeline description vanished after fetch",
                    spec.id
                ))
            })?;
        let model = self
            .parser
            .parse(description)
            .map_err(|source| PipeconfError::PipelineModel {
                id: spec.id.clone(),
                source,
            })?;

        debug!(pipeconf = %spec.id, artifacts = extensions.len(), behaviours = spec.behaviours.len(), "pipeconf built");
        Ok(PipeconfBundle::new(
            spec.id.clone(),
            model,
            spec.behaviours.clone(),
            extensions,
        ))
    }
}

fn check_declared_kinds(spec: &PipeconfBuildSpec) -> Result<(), PipeconfError> {
    let mut seen = HashSet::new();
    for (kind, _) in &spec.artifacts {
        if !seen.insert(*kind) {
            return Err(PipeconfError::Config(format!(
                "{}: {kind} artifact declared more than once",
                spec.id
            )));
        }
    }
    if !seen.contains(&ExtensionKind::PIPELINE_DESCRIPTION) {
        return Err(PipeconfError::Config(format!(
            "{}: no {} artifact declared",
            spec.id,
            ExtensionKind::PIPELINE_DESCRIPTION
        )));
    }
    Ok(())
}
