// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The assembled pipeline configuration and its behaviour bindings.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use pipeconf_core::{
    Capability, ExtensionKind, PipeconfError, PipeconfId, PipelineModel, Strategy,
    StrategyFactory,
};
use sha2::{Digest, Sha256};

/// Immutable mapping from capability to the factory implementing it.
#[derive(Clone, Default)]
pub struct BehaviourBindings {
    bindings: BTreeMap<Capability, Arc<dyn StrategyFactory>>,
}

impl BehaviourBindings {
    pub fn builder() -> BehaviourBindingsBuilder {
        BehaviourBindingsBuilder::default()
    }

    /// An empty binding set.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn get(&self, capability: &Capability) -> Option<&Arc<dyn StrategyFactory>> {
        self.bindings.get(capability)
    }

    /// Bound capabilities in sorted order.
    pub fn capabilities(&self) -> impl Iterator<Item = &Capability> {
        self.bindings.keys()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for BehaviourBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.bindings
                    .iter()
                    .map(|(cap, factory)| (cap.as_str(), factory.implementation())),
            )
            .finish()
    }
}

/// Collects bindings; a later `bind` for the same capability wins.
#[derive(Default)]
pub struct BehaviourBindingsBuilder {
    bindings: BTreeMap<Capability, Arc<dyn StrategyFactory>>,
}

impl BehaviourBindingsBuilder {
    pub fn bind(
        mut self,
        capability: impl Into<Capability>,
        factory: Arc<dyn StrategyFactory>,
    ) -> Self {
        self.bindings.insert(capability.into(), factory);
        self
    }

    pub fn build(self) -> BehaviourBindings {
        BehaviourBindings {
            bindings: self.bindings,
        }
    }
}

/// A fully assembled pipeline configuration.
///
/// Bundles are only produced by [`PipeconfBuilder`](crate::builder::PipeconfBuilder)
/// and never change afterwards.
pub struct PipeconfBundle {
    id: PipeconfId,
    pipeline_model: Arc<dyn PipelineModel>,
    behaviours: BehaviourBindings,
    extensions: BTreeMap<ExtensionKind, Vec<u8>>,
}

impl PipeconfBundle {
    pub(crate) fn new(
        id: PipeconfId,
        pipeline_model: Arc<dyn PipelineModel>,
        behaviours: BehaviourBindings,
        extensions: BTreeMap<ExtensionKind, Vec<u8>>,
    ) -> Self {
        Self {
            id,
            pipeline_model,
            behaviours,
            extensions,
        }
    }

    pub fn id(&self) -> &PipeconfId {
        &self.id
    }

    pub fn pipeline_model(&self) -> &Arc<dyn PipelineModel> {
        &self.pipeline_model
    }

    pub fn behaviours(&self) -> &BehaviourBindings {
        &self.behaviours
    }

    pub fn capabilities(&self) -> impl Iterator<Item = &Capability> {
        self.behaviours.capabilities()
    }

    pub fn has_behaviour(&self, capability: &Capability) -> bool {
        self.behaviours.get(capability).is_some()
    }

    /// Construct the strategy bound to `capability`.
    pub fn instantiate(&self, capability: &Capability) -> Result<Box<dyn Strategy>, PipeconfError> {
        let factory = self
            .behaviours
            .get(capability)
            .ok_or_else(|| PipeconfError::Strategy {
                capability: capability.clone(),
                message: format!("no behaviour bound in pipeconf {}", self.id),
            })?;
        factory.create()
    }

    pub fn extension(&self, kind: ExtensionKind) -> Option<&[u8]> {
        self.extensions.get(&kind).map(Vec::as_slice)
    }

    pub fn extensions(&self) -> &BTreeMap<ExtensionKind, Vec<u8>> {
        &self.extensions
    }

    /// CPU port number from the `CpuPortTxt` extension, if the bundle carries one.
    pub fn cpu_port(&self) -> Result<Option<u32>, PipeconfError> {
        let Some(raw) = self.extension(ExtensionKind::CpuPortTxt) else {
            return Ok(None);
        };
        let text = std::str::from_utf8(raw).map_err(|e| {
            PipeconfError::Config(format!("{}: cpu port file is not UTF-8: {e}", self.id))
        })?;
        text.trim().parse::<u32>().map(Some).map_err(|e| {
            PipeconfError::Config(format!(
                "{}: invalid cpu port `{}`: {e}",
                self.id,
                text.trim()
            ))
        })
    }

    /// Hex SHA-256 over the identity and every extension, in kind order.
    ///
    /// Two bundles with the same identity and artifacts share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.id.as_str().as_bytes());
        for (kind, bytes) in &self.extensions {
            hasher.update([0u8]);
            hasher.update(kind.to_string().as_bytes());
            hasher.update((bytes.len() as u64).to_be_bytes());
            hasher.update(bytes);
        }
        hex::encode(hasher.finalize())
    }
}

impl PartialEq for PipeconfBundle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.extensions == other.extensions
            && self.behaviours.capabilities().eq(other.behaviours.capabilities())
            && Arc::ptr_eq(&self.pipeline_model, &other.pipeline_model)
    }
}

impl fmt::Debug for PipeconfBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipeconfBundle")
            .field("id", &self.id)
            .field("pipeline_model", &self.pipeline_model)
            .field("behaviours", &self.behaviours)
            .field(
                "extensions",
                &self
                    .extensions
                    .iter()
                    .map(|(kind, bytes)| (kind, bytes.len()))
                    .collect::<BTreeMap<_, _>>(),
            )
            .finish()
    }
}
