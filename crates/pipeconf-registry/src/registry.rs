// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrency-safe store of registered pipeconfs.
//!
//! The `PipeconfRegistry` maps each [`PipeconfId`] to at most one
//! [`PipeconfBundle`]. A single read/write lock guards the mapping; building
//! bundles happens before `register` is called, so the lock is only ever held
//! for map operations.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use pipeconf_core::{DuplicatePolicy, PipeconfError, PipeconfId};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::bundle::PipeconfBundle;

const EVENT_CAPACITY: usize = 64;

/// A committed change to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    Registered { id: PipeconfId },
    /// An existing bundle was swapped out under the replace policy.
    Replaced { id: PipeconfId },
    Unregistered { id: PipeconfId },
}

/// Registry of pipeline configurations keyed by identity.
pub struct PipeconfRegistry {
    policy: DuplicatePolicy,
    bundles: RwLock<HashMap<PipeconfId, Arc<PipeconfBundle>>>,
    events: broadcast::Sender<RegistryEvent>,
}

impl PipeconfRegistry {
    pub fn new(policy: DuplicatePolicy) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            policy,
            bundles: RwLock::new(HashMap::new()),
            events,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register a bundle under its own identity.
    ///
    /// Under [`DuplicatePolicy::Reject`] an identity that is already present
    /// fails with `DuplicateIdentity` and the stored bundle is kept. Under
    /// [`DuplicatePolicy::Replace`] the stored bundle is swapped atomically.
    pub fn register(&self, bundle: PipeconfBundle) -> Result<Arc<PipeconfBundle>, PipeconfError> {
        let bundle = Arc::new(bundle);
        let id = bundle.id().clone();

        let mut bundles = self.bundles.write();
        let event = match (bundles.contains_key(&id), self.policy) {
            (true, DuplicatePolicy::Reject) => {
                debug!(pipeconf = %id, "duplicate registration rejected");
                return Err(PipeconfError::DuplicateIdentity { id });
            }
            (true, DuplicatePolicy::Replace) => RegistryEvent::Replaced { id: id.clone() },
            (false, _) => RegistryEvent::Registered { id: id.clone() },
        };
        bundles.insert(id.clone(), Arc::clone(&bundle));
        // Published under the lock so subscribers see commit order.
        let _ = self.events.send(event);
        drop(bundles);

        info!(pipeconf = %id, fingerprint = %bundle.fingerprint(), "pipeconf registered");
        Ok(bundle)
    }

    /// Remove the bundle registered under `id`.
    ///
    /// Returns whether a bundle was removed; an absent identity is a no-op.
    pub fn unregister(&self, id: &PipeconfId) -> bool {
        let mut bundles = self.bundles.write();
        let removed = bundles.remove(id).is_some();
        if removed {
            let _ = self.events.send(RegistryEvent::Unregistered { id: id.clone() });
        }
        drop(bundles);

        if removed {
            info!(pipeconf = %id, "pipeconf unregistered");
        } else {
            debug!(pipeconf = %id, "unregister of absent pipeconf ignored");
        }
        removed
    }

    pub fn lookup(&self, id: &PipeconfId) -> Option<Arc<PipeconfBundle>> {
        self.bundles.read().get(id).cloned()
    }

    pub fn contains(&self, id: &PipeconfId) -> bool {
        self.bundles.read().contains_key(id)
    }

    /// Snapshot of the registered identities, sorted.
    pub fn list(&self) -> BTreeSet<PipeconfId> {
        self.bundles.read().keys().cloned().collect()
    }

    /// Receive every change committed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.events.subscribe()
    }

    pub fn len(&self) -> usize {
        self.bundles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.read().is_empty()
    }
}

impl Default for PipeconfRegistry {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}

impl std::fmt::Debug for PipeconfRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipeconfRegistry")
            .field("policy", &self.policy)
            .field("bundles", &self.list())
            .finish()
    }
}
