// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Artifact providers backed by a directory or by memory.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use pipeconf_core::ArtifactProvider;
use tracing::{debug, warn};

/// Resolves resource names relative to a root directory.
///
/// A leading `/` is ignored, so `"/p4info.txt"` and `"p4info.txt"` name the
/// same file. Names that would escape the root are reported as absent.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name.trim_start_matches('/'));
        let confined = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !confined || relative.as_os_str().is_empty() {
            warn!(resource = name, "resource name escapes the artifact root");
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl ArtifactProvider for DirectoryProvider {
    fn fetch(&self, name: &str) -> Option<Vec<u8>> {
        let path = self.resolve(name)?;
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "artifact not present");
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read artifact");
                None
            }
        }
    }
}

/// In-memory artifacts, e.g. resources embedded with `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct StaticArtifacts {
    artifacts: HashMap<String, Vec<u8>>,
}

impl StaticArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl AsRef<str>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&mut self, name: impl AsRef<str>, bytes: impl Into<Vec<u8>>) {
        self.artifacts
            .insert(normalize(name.as_ref()).to_string(), bytes.into());
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ArtifactProvider for StaticArtifacts {
    fn fetch(&self, name: &str) -> Option<Vec<u8>> {
        self.artifacts.get(normalize(name)).cloned()
    }
}

impl<N: AsRef<str>, B: Into<Vec<u8>>> FromIterator<(N, B)> for StaticArtifacts {
    fn from_iter<I: IntoIterator<Item = (N, B)>>(iter: I) -> Self {
        let mut artifacts = Self::new();
        for (name, bytes) in iter {
            artifacts.insert(name, bytes);
        }
        artifacts
    }
}

fn normalize(name: &str) -> &str {
    name.trim_start_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_provider_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cpu-port.txt"), b"253").unwrap();
        std::fs::create_dir(dir.path().join("bmv2")).unwrap();
        std::fs::write(dir.path().join("bmv2/bmv2.json"), b"{}").unwrap();

        let provider = DirectoryProvider::new(dir.path());
        assert_eq!(provider.fetch("cpu-port.txt"), Some(b"253".to_vec()));
        assert_eq!(provider.fetch("/cpu-port.txt"), Some(b"253".to_vec()));
        assert_eq!(provider.fetch("bmv2/bmv2.json"), Some(b"{}".to_vec()));
    }

    #[test]
    fn directory_provider_reports_absence() {
        let dir = tempfile::tempdir().unwrap();
        let provider = DirectoryProvider::new(dir.path());
        assert_eq!(provider.fetch("main.pb.bin"), None);
        assert_eq!(provider.fetch(""), None);
    }

    #[test]
    fn directory_provider_rejects_parent_components() {
        let dir = tempfile::tempdir().unwrap();
        let inner = dir.path().join("resources");
        std::fs::create_dir(&inner).unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"nope").unwrap();

        let provider = DirectoryProvider::new(&inner);
        assert_eq!(provider.fetch("../secret.txt"), None);
        assert_eq!(provider.fetch("a/../../secret.txt"), None);
    }

    #[test]
    fn directory_is_not_an_artifact() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("p4info.txt")).unwrap();
        let provider = DirectoryProvider::new(dir.path());
        assert_eq!(provider.fetch("p4info.txt"), None);
    }

    #[test]
    fn static_artifacts_normalize_leading_slash() {
        let artifacts = StaticArtifacts::new().with("/p4info.txt", b"x".to_vec());
        assert_eq!(artifacts.fetch("p4info.txt"), Some(b"x".to_vec()));
        assert_eq!(artifacts.fetch("/p4info.txt"), Some(b"x".to_vec()));
        assert_eq!(artifacts.fetch("bmv2.json"), None);
    }

    #[test]
    fn static_artifacts_collect_from_pairs() {
        let artifacts: StaticArtifacts =
            [("a", b"1".to_vec()), ("b", b"2".to_vec())].into_iter().collect();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts.fetch("b"), Some(b"2".to_vec()));
    }
}
