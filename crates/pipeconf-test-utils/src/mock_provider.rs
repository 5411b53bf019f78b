// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock artifact provider for deterministic testing.

use std::collections::HashMap;

use parking_lot::Mutex;
use pipeconf_core::ArtifactProvider;

/// Artifacts held in memory; every fetch (hit or miss) is recorded.
#[derive(Default)]
pub struct MockProvider {
    artifacts: HashMap<String, Vec<u8>>,
    fetched: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite an artifact.
    pub fn with(mut self, name: &str, bytes: Vec<u8>) -> Self {
        self.artifacts.insert(name.to_string(), bytes);
        self
    }

    /// Names requested so far, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().len()
    }
}

impl ArtifactProvider for MockProvider {
    fn fetch(&self, name: &str) -> Option<Vec<u8>> {
        self.fetched.lock().push(name.to_string());
        self.artifacts.get(name).cloned()
    }
}
