// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Artifact provider trait for resolving bundled resources by name.

use std::sync::Arc;

/// Resolves a logical resource name (e.g. "p4info.txt") to its bytes.
///
/// Fetches are read-only. Absence is reported as `None`, not as an error.
pub trait ArtifactProvider: Send + Sync {
    fn fetch(&self, name: &str) -> Option<Vec<u8>>;
}

impl<T: ArtifactProvider + ?Sized> ArtifactProvider for Arc<T> {
    fn fetch(&self, name: &str) -> Option<Vec<u8>> {
        (**self).fetch(name)
    }
}

impl<T: ArtifactProvider + ?Sized> ArtifactProvider for &T {
    fn fetch(&self, name: &str) -> Option<Vec<u8>> {
        (**self).fetch(name)
    }
}
