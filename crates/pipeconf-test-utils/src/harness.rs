// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for activation tests.
//!
//! `TestHarness` wires a registry, the mock parser, and an artifact source
//! (in memory, or a temporary resource directory behind `DirectoryProvider`)
//! so tests can drive a lifecycle controller or a loader without repeating
//! the setup.

use std::path::Path;
use std::sync::Arc;

use pipeconf_config::PipeconfConfig;
use pipeconf_core::{
    ArtifactProvider, Capability, DuplicatePolicy, ExtensionKind, PipeconfError, PipeconfId,
};
use pipeconf_registry::{
    BehaviourBindings, DirectoryProvider, PipeconfBuildSpec, PipeconfLoader, PipeconfRegistry,
    RegistryLifecycleController,
};
use tempfile::TempDir;

use crate::mock_parser::MockParser;
use crate::mock_provider::MockProvider;
use crate::mock_strategy::MockStrategyFactory;

/// Interpreter and pipeliner bindings shaped like the BCM behaviours.
pub fn bcm_behaviours() -> BehaviourBindings {
    BehaviourBindings::builder()
        .bind(
            Capability::interpreter(),
            Arc::new(MockStrategyFactory::new("BcmPipelineInterpreter")),
        )
        .bind(
            Capability::pipeliner(),
            Arc::new(MockStrategyFactory::new("BcmPipeliner")),
        )
        .build()
}

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    policy: DuplicatePolicy,
    artifacts: Vec<(String, Vec<u8>)>,
    behaviours: BehaviourBindings,
    on_disk: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            policy: DuplicatePolicy::Reject,
            artifacts: Vec::new(),
            behaviours: BehaviourBindings::none(),
            on_disk: false,
        }
    }

    /// Set the registry's duplicate policy (default `Reject`).
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Make an artifact available under `name`.
    pub fn with_artifact(mut self, name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.artifacts.push((name.to_string(), bytes.into()));
        self
    }

    /// Add the resources the built-in BCM pipeconfs read.
    ///
    /// The FPM binary is only added when `with_fpm` is set.
    pub fn with_bcm_resources(self, with_fpm: bool) -> Self {
        let harness = self
            .with_artifact("p4info.txt", &b"pkg_info { arch: \"v1model\" }"[..])
            .with_artifact("cpu-port.txt", &b"253\n"[..])
            .with_artifact("bmv2.json", &b"{\"pipelines\": []}"[..]);
        if with_fpm {
            harness.with_artifact("main.pb.bin", vec![0x0a, 0x03, 0x62, 0x63, 0x6d])
        } else {
            harness
        }
    }

    /// Behaviour bindings handed to loaders built from this harness.
    pub fn with_behaviours(mut self, behaviours: BehaviourBindings) -> Self {
        self.behaviours = behaviours;
        self
    }

    /// Serve artifacts from a temporary directory instead of memory.
    pub fn on_disk(mut self) -> Self {
        self.on_disk = true;
        self
    }

    /// Build the test harness, writing artifacts to disk if requested.
    pub fn build(self) -> std::io::Result<TestHarness> {
        let mut mock_provider = None;
        let mut resource_dir = None;
        let provider: Arc<dyn ArtifactProvider> = if self.on_disk {
            let dir = TempDir::new()?;
            for (name, bytes) in &self.artifacts {
                let path = dir.path().join(name);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, bytes)?;
            }
            let provider = Arc::new(DirectoryProvider::new(dir.path()));
            resource_dir = Some(dir);
            provider
        } else {
            let mock = self
                .artifacts
                .iter()
                .fold(MockProvider::new(), |p, (name, bytes)| p.with(name, bytes.clone()));
            let mock = Arc::new(mock);
            mock_provider = Some(Arc::clone(&mock));
            mock
        };

        Ok(TestHarness {
            registry: Arc::new(PipeconfRegistry::new(self.policy)),
            parser: Arc::new(MockParser::new()),
            provider,
            mock_provider,
            behaviours: self.behaviours,
            resource_dir,
        })
    }
}

/// A registry with mock collaborators and a ready artifact source.
pub struct TestHarness {
    /// Registry shared by every controller and loader this harness creates.
    pub registry: Arc<PipeconfRegistry>,
    /// The mock parser; `calls()` counts parses across all builds.
    pub parser: Arc<MockParser>,
    /// Artifact source handed to controllers and loaders.
    pub provider: Arc<dyn ArtifactProvider>,
    /// The in-memory provider behind `provider`, absent when on disk.
    pub mock_provider: Option<Arc<MockProvider>>,
    /// Behaviour bindings given to loaders.
    pub behaviours: BehaviourBindings,
    /// Temp directory kept alive for cleanup on drop.
    resource_dir: Option<TempDir>,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Spec with a single P4Info artifact read from `resource`.
    pub fn spec(name: &str, resource: &str) -> PipeconfBuildSpec {
        let id = PipeconfId::new(name).unwrap_or_else(|e| panic!("bad test id {name:?}: {e}"));
        PipeconfBuildSpec::new(id).with_artifact(ExtensionKind::P4InfoText, resource)
    }

    /// Directory artifacts were written to, when built with `on_disk`.
    pub fn resource_dir(&self) -> Option<&Path> {
        self.resource_dir.as_ref().map(TempDir::path)
    }

    /// A fresh lifecycle controller over the shared registry.
    pub fn controller(&self) -> RegistryLifecycleController {
        RegistryLifecycleController::new(
            Arc::clone(&self.registry),
            self.parser.clone(),
            Arc::clone(&self.provider),
        )
    }

    /// Loader for the built-in BCM pipeconfs over the shared registry.
    pub fn loader(&self) -> PipeconfLoader {
        PipeconfLoader::new(
            Arc::clone(&self.registry),
            self.parser.clone(),
            Arc::clone(&self.provider),
            self.behaviours.clone(),
        )
    }

    /// Loader for the pipeconfs named by `config` over the shared registry.
    pub fn loader_from_config(
        &self,
        config: &PipeconfConfig,
    ) -> Result<PipeconfLoader, PipeconfError> {
        PipeconfLoader::from_config(
            config,
            Arc::clone(&self.registry),
            self.parser.clone(),
            Arc::clone(&self.provider),
            self.behaviours.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_empty_in_memory_reject() {
        let harness = TestHarness::builder().build().unwrap();
        assert_eq!(harness.registry.policy(), DuplicatePolicy::Reject);
        assert!(harness.registry.is_empty());
        assert!(harness.resource_dir().is_none());
        assert!(harness.provider.fetch("p4info.txt").is_none());
        assert_eq!(harness.mock_provider.as_ref().unwrap().fetch_count(), 1);
    }

    #[test]
    fn on_disk_writes_nested_artifacts() {
        let harness = TestHarness::builder()
            .with_artifact("one/p4info.txt", &b"1"[..])
            .on_disk()
            .build()
            .unwrap();
        let dir = harness.resource_dir().unwrap();
        assert!(dir.join("one/p4info.txt").is_file());
        assert_eq!(harness.provider.fetch("one/p4info.txt"), Some(b"1".to_vec()));
        assert!(harness.mock_provider.is_none());
    }

    #[test]
    fn controller_registers_into_shared_registry() {
        let harness = TestHarness::builder()
            .with_policy(DuplicatePolicy::Replace)
            .with_artifact("p4info.txt", &b"p4"[..])
            .build()
            .unwrap();
        let report = harness
            .controller()
            .start(&[TestHarness::spec("one", "p4info.txt")]);
        assert_eq!(report.succeeded().len(), 1);
        assert_eq!(harness.registry.len(), 1);
        assert_eq!(harness.parser.calls(), 1);
    }

    #[test]
    fn bcm_resources_activate_both_builtins() {
        let harness = TestHarness::builder()
            .with_bcm_resources(true)
            .with_behaviours(bcm_behaviours())
            .build()
            .unwrap();
        let report = harness.loader().on_activate();
        assert_eq!(report.succeeded().len(), 2);
    }
}
