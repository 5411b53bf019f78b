// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host-facing activation adapter.
//!
//! `PipeconfLoader` is the narrow boundary a host plugin framework calls into:
//! `on_activate` registers the configured pipeconfs and `on_deactivate`
//! removes them again. All collaborators are passed in explicitly.

use std::sync::Arc;

use pipeconf_config::PipeconfConfig;
use pipeconf_core::{ArtifactProvider, PipeconfError, PipelineModelParser};
use tracing::info;

use crate::builder::PipeconfBuildSpec;
use crate::bundle::BehaviourBindings;
use crate::catalog::{builtin_catalog, PIPELINE_APP_NAME};
use crate::lifecycle::{ActivationReport, LifecycleState, RegistryLifecycleController};
use crate::manifest::PipeconfManifest;
use crate::registry::PipeconfRegistry;

/// Activates a fixed set of pipeconfs under one application name.
///
/// Built either from the built-in catalog ([`PipeconfLoader::new`]) or from
/// configuration ([`PipeconfLoader::from_config`]).
pub struct PipeconfLoader {
    app_name: String,
    specs: Vec<PipeconfBuildSpec>,
    controller: RegistryLifecycleController,
}

impl PipeconfLoader {
    /// Loader for the built-in BCM pipeconfs, all sharing `behaviours`.
    pub fn new(
        registry: Arc<PipeconfRegistry>,
        parser: Arc<dyn PipelineModelParser>,
        provider: Arc<dyn ArtifactProvider>,
        behaviours: BehaviourBindings,
    ) -> Self {
        let specs = builtin_catalog()
            .iter()
            .map(|m| m.to_build_spec(behaviours.clone()))
            .collect();
        Self::with_specs(PIPELINE_APP_NAME, specs, registry, parser, provider)
    }

    /// Loader for the pipeconfs named by `config`: the built-in catalog
    /// (unless disabled) followed by every `[[pipeconfs]]` entry.
    pub fn from_config(
        config: &PipeconfConfig,
        registry: Arc<PipeconfRegistry>,
        parser: Arc<dyn PipelineModelParser>,
        provider: Arc<dyn ArtifactProvider>,
        behaviours: BehaviourBindings,
    ) -> Result<Self, PipeconfError> {
        let mut manifests = if config.loader.builtin_catalog {
            builtin_catalog()
        } else {
            Vec::new()
        };
        for entry in &config.pipeconfs {
            manifests.push(PipeconfManifest::try_from(entry)?);
        }

        let specs = manifests
            .iter()
            .map(|m| m.to_build_spec(behaviours.clone()))
            .collect();
        Ok(Self::with_specs(
            config.loader.app_name.clone(),
            specs,
            registry,
            parser,
            provider,
        ))
    }

    pub fn with_specs(
        app_name: impl Into<String>,
        specs: Vec<PipeconfBuildSpec>,
        registry: Arc<PipeconfRegistry>,
        parser: Arc<dyn PipelineModelParser>,
        provider: Arc<dyn ArtifactProvider>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            specs,
            controller: RegistryLifecycleController::new(registry, parser, provider),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn specs(&self) -> &[PipeconfBuildSpec] {
        &self.specs
    }

    pub fn registry(&self) -> &Arc<PipeconfRegistry> {
        self.controller.registry()
    }

    pub fn state(&self) -> LifecycleState {
        self.controller.state()
    }

    /// Register every pipeconf this loader knows about.
    pub fn on_activate(&self) -> ActivationReport {
        info!(app = %self.app_name, pipeconfs = self.specs.len(), "activating");
        let report = self.controller.start(&self.specs);
        info!(app = %self.app_name, "Started");
        report
    }

    /// Unregister whatever this loader registered and is still present.
    pub fn on_deactivate(&self) {
        self.controller.stop();
        info!(app = %self.app_name, "Stopped");
    }
}

impl std::fmt::Debug for PipeconfLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipeconfLoader")
            .field("app_name", &self.app_name)
            .field(
                "specs",
                &self.specs.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            )
            .field("controller", &self.controller)
            .finish()
    }
}
