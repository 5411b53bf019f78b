// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline configuration builder, registry, and lifecycle.
//!
//! Pipeconfs are built from named artifacts by [`PipeconfBuilder`], stored in
//! the concurrency-safe [`PipeconfRegistry`], and brought up or torn down as a
//! group by [`RegistryLifecycleController`]. [`PipeconfLoader`] wraps all of it
//! behind the activate/deactivate pair a host framework calls.

pub mod builder;
pub mod bundle;
pub mod catalog;
pub mod lifecycle;
pub mod loader;
pub mod manifest;
pub mod provider;
pub mod registry;

pub use builder::{PipeconfBuildSpec, PipeconfBuilder};
pub use bundle::{BehaviourBindings, BehaviourBindingsBuilder, PipeconfBundle};
pub use catalog::{builtin_catalog, search_catalog};
pub use lifecycle::{ActivationReport, LifecycleState, RegistryLifecycleController, SpecOutcome};
pub use loader::PipeconfLoader;
pub use manifest::{parse_pipeconf_manifest, ArtifactDecl, PipeconfManifest};
pub use provider::{DirectoryProvider, StaticArtifacts};
pub use registry::{PipeconfRegistry, RegistryEvent};
