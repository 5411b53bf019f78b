// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Activation and deactivation of a set of pipeconfs.
//!
//! The controller builds each spec independently: one spec failing never
//! prevents the others from being registered. Every identity it registered is
//! remembered so `stop` can remove exactly those.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use pipeconf_core::{ArtifactProvider, PipeconfError, PipeconfId, PipelineModelParser};
use tracing::{info, warn};

use crate::builder::{PipeconfBuildSpec, PipeconfBuilder};
use crate::registry::PipeconfRegistry;

/// Whether the controller has been started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Inactive,
    Active,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Inactive => write!(f, "inactive"),
            LifecycleState::Active => write!(f, "active"),
        }
    }
}

/// Result of building and registering one spec.
#[derive(Debug)]
pub struct SpecOutcome {
    /// Identity declared by the spec.
    pub id: PipeconfId,
    /// Fingerprint of the registered bundle, or why the spec failed.
    pub result: Result<String, PipeconfError>,
}

impl SpecOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-spec outcomes of a [`RegistryLifecycleController::start`] call, in spec order.
#[derive(Debug, Default)]
pub struct ActivationReport {
    /// One entry per spec passed to `start`.
    pub outcomes: Vec<SpecOutcome>,
}

impl ActivationReport {
    pub fn succeeded(&self) -> Vec<&PipeconfId> {
        self.outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(|o| &o.id)
            .collect()
    }

    pub fn failed(&self) -> Vec<(&PipeconfId, &PipeconfError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.id, e)))
            .collect()
    }

    /// True when at least one spec was attempted and none succeeded.
    pub fn is_total_failure(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| !o.is_success())
    }
}

impl fmt::Display for ActivationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(fingerprint) => {
                    let short = &fingerprint[..12.min(fingerprint.len())];
                    writeln!(f, "  ok    {} ({short})", outcome.id)?
                }
                Err(e) => writeln!(f, "  FAIL  {}: {e}", outcome.id)?,
            }
        }
        write!(
            f,
            "{} registered, {} failed",
            self.succeeded().len(),
            self.failed().len()
        )
    }
}

struct ControllerState {
    state: LifecycleState,
    registered: Vec<PipeconfId>,
}

/// Drives startup and shutdown of a set of pipeconfs against a registry.
pub struct RegistryLifecycleController {
    registry: Arc<PipeconfRegistry>,
    parser: Arc<dyn PipelineModelParser>,
    provider: Arc<dyn ArtifactProvider>,
    inner: Mutex<ControllerState>,
}

impl RegistryLifecycleController {
    pub fn new(
        registry: Arc<PipeconfRegistry>,
        parser: Arc<dyn PipelineModelParser>,
        provider: Arc<dyn ArtifactProvider>,
    ) -> Self {
        Self {
            registry,
            parser,
            provider,
            inner: Mutex::new(ControllerState {
                state: LifecycleState::Inactive,
                registered: Vec::new(),
            }),
        }
    }

    pub fn registry(&self) -> &Arc<PipeconfRegistry> {
        &self.registry
    }

    pub fn state(&self) -> LifecycleState {
        self.inner.lock().state
    }

    /// Identities this controller registered and has not yet stopped.
    pub fn registered(&self) -> Vec<PipeconfId> {
        self.inner.lock().registered.clone()
    }

    /// Build and register every spec, recording each outcome.
    ///
    /// Always ends `Active`; the caller decides what a report with no
    /// successes means. Builds run without holding the controller lock, so
    /// `state`, `registered`, and `stop` stay responsive during activation.
    pub fn start(&self, specs: &[PipeconfBuildSpec]) -> ActivationReport {
        let builder = PipeconfBuilder::new(self.parser.as_ref(), self.provider.as_ref());

        let mut report = ActivationReport::default();
        let mut registered = Vec::new();
        for spec in specs {
            let result = builder
                .build(spec)
                .and_then(|bundle| self.registry.register(bundle))
                .map(|bundle| bundle.fingerprint());

            match &result {
                Ok(_) => registered.push(spec.id.clone()),
                Err(e) => warn!(pipeconf = %spec.id, error = %e, "unable to register pipeconf"),
            }
            report.outcomes.push(SpecOutcome {
                id: spec.id.clone(),
                result,
            });
        }

        let mut inner = self.inner.lock();
        for id in registered {
            if !inner.registered.contains(&id) {
                inner.registered.push(id);
            }
        }
        inner.state = LifecycleState::Active;
        drop(inner);

        info!(
            registered = report.succeeded().len(),
            failed = report.failed().len(),
            "pipeconf activation complete"
        );
        report
    }

    /// Unregister everything this controller registered.
    ///
    /// Bundles already removed by someone else are skipped. Calling `stop`
    /// while inactive, or twice, does nothing.
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        if inner.state == LifecycleState::Inactive && inner.registered.is_empty() {
            return;
        }

        let mut removed = 0usize;
        for id in inner.registered.drain(..) {
            if self.registry.unregister(&id) {
                removed += 1;
            }
        }
        inner.state = LifecycleState::Inactive;
        info!(removed, "pipeconf deactivation complete");
    }
}

impl fmt::Debug for RegistryLifecycleController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("RegistryLifecycleController")
            .field("state", &inner.state)
            .field("registered", &inner.registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeconf_core::{DuplicatePolicy, ExtensionKind};
    use pipeconf_test_utils::{MockParser, MockProvider};
    use std::sync::{OnceLock, Weak};
    use tracing_test::traced_test;

    fn id(name: &str) -> PipeconfId {
        PipeconfId::new(name).unwrap()
    }

    fn spec(name: &str, resource: &str) -> PipeconfBuildSpec {
        PipeconfBuildSpec::new(id(name)).with_artifact(ExtensionKind::P4InfoText, resource)
    }

    fn controller(policy: DuplicatePolicy) -> RegistryLifecycleController {
        let provider = MockProvider::new()
            .with("one.txt", b"1".to_vec())
            .with("three.txt", b"3".to_vec());
        RegistryLifecycleController::new(
            Arc::new(PipeconfRegistry::new(policy)),
            Arc::new(MockParser::new()),
            Arc::new(provider),
        )
    }

    #[test]
    fn starts_inactive() {
        let c = controller(DuplicatePolicy::Reject);
        assert_eq!(c.state(), LifecycleState::Inactive);
        assert!(c.registered().is_empty());
    }

    #[traced_test]
    #[test]
    fn failed_spec_does_not_block_the_rest() {
        let c = controller(DuplicatePolicy::Reject);
        let report = c.start(&[
            spec("one", "one.txt"),
            spec("two", "two.txt"),
            spec("three", "three.txt"),
        ]);

        assert_eq!(c.state(), LifecycleState::Active);
        assert_eq!(report.succeeded(), vec![&id("one"), &id("three")]);
        let failed = report.failed();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, &id("two"));
        assert!(matches!(failed[0].1, PipeconfError::ArtifactMissing { resource } if resource == "two.txt"));
        assert!(!report.is_total_failure());
        assert!(logs_contain("unable to register pipeconf"));
    }

    #[test]
    fn all_failures_still_activate() {
        let c = controller(DuplicatePolicy::Reject);
        let report = c.start(&[spec("two", "two.txt")]);
        assert_eq!(c.state(), LifecycleState::Active);
        assert!(report.is_total_failure());
    }

    #[test]
    fn empty_start_is_not_a_failure() {
        let c = controller(DuplicatePolicy::Reject);
        let report = c.start(&[]);
        assert!(!report.is_total_failure());
        assert_eq!(c.state(), LifecycleState::Active);
    }

    #[test]
    fn stop_from_inactive_is_noop() {
        let c = controller(DuplicatePolicy::Reject);
        c.stop();
        c.stop();
        assert_eq!(c.state(), LifecycleState::Inactive);
    }

    #[test]
    fn stop_skips_bundles_removed_elsewhere() {
        let c = controller(DuplicatePolicy::Reject);
        c.start(&[spec("one", "one.txt"), spec("three", "three.txt")]);
        assert!(c.registry().unregister(&id("one")));

        c.stop();
        assert!(c.registry().is_empty());
        assert!(c.registered().is_empty());
    }

    #[test]
    fn stop_leaves_foreign_registrations_alone() {
        let c = controller(DuplicatePolicy::Reject);
        let foreign = PipeconfBuilder::new(&MockParser::new(), &MockProvider::new().with("f", b"f".to_vec()))
            .build(&spec("foreign", "f"))
            .unwrap();
        c.registry().register(foreign).unwrap();
        c.start(&[spec("one", "one.txt")]);

        c.stop();
        assert_eq!(c.registry().list().into_iter().collect::<Vec<_>>(), vec![id("foreign")]);
    }

    #[test]
    fn duplicate_within_one_start_is_reported() {
        let c = controller(DuplicatePolicy::Reject);
        let report = c.start(&[spec("one", "one.txt"), spec("one", "three.txt")]);
        assert_eq!(report.succeeded().len(), 1);
        assert!(matches!(report.failed()[0].1, PipeconfError::DuplicateIdentity { .. }));
        assert_eq!(c.registered(), vec![id("one")]);
    }

    #[test]
    fn report_display_lists_each_spec() {
        let c = controller(DuplicatePolicy::Reject);
        let report = c.start(&[spec("one", "one.txt"), spec("two", "two.txt")]);
        let rendered = report.to_string();
        assert!(rendered.contains("ok    one"));
        assert!(rendered.contains("FAIL  two: artifact not found: two.txt"));
        assert!(rendered.ends_with("1 registered, 1 failed"));
    }

    /// Reads the controller's state from inside every fetch.
    #[derive(Default)]
    struct StateObservingProvider {
        controller: OnceLock<Weak<RegistryLifecycleController>>,
        seen: Mutex<Vec<LifecycleState>>,
    }

    impl ArtifactProvider for StateObservingProvider {
        fn fetch(&self, _name: &str) -> Option<Vec<u8>> {
            if let Some(controller) = self.controller.get().and_then(Weak::upgrade) {
                self.seen.lock().push(controller.state());
                assert!(controller.registered().is_empty());
            }
            Some(b"p4".to_vec())
        }
    }

    #[test]
    fn state_is_readable_while_building() {
        let provider = Arc::new(StateObservingProvider::default());
        let controller = Arc::new(RegistryLifecycleController::new(
            Arc::new(PipeconfRegistry::default()),
            Arc::new(MockParser::new()),
            provider.clone(),
        ));
        provider
            .controller
            .set(Arc::downgrade(&controller))
            .unwrap_or_else(|_| panic!("controller already set"));

        let report = controller.start(&[spec("one", "a"), spec("two", "b")]);
        assert_eq!(report.succeeded().len(), 2);
        assert_eq!(
            *provider.seen.lock(),
            vec![LifecycleState::Inactive, LifecycleState::Inactive]
        );
        assert_eq!(controller.registered(), vec![id("one"), id("two")]);
    }
}
