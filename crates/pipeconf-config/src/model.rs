// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the pipeconf registry.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a mistyped key is
//! reported at startup instead of being silently ignored.

use pipeconf_core::{DuplicatePolicy, ExtensionKind};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Every section is optional and defaults to the values the built-in BCM
/// loader uses.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipeconfConfig {
    /// Registry behaviour.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where bundled artifacts are resolved from.
    #[serde(default)]
    pub resources: ResourcesConfig,

    /// Host adapter settings.
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Extra pipeconfs to build on activation, after the built-in catalog.
    #[serde(default)]
    pub pipeconfs: Vec<PipeconfEntryConfig>,
}

/// Registry configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Behaviour on registering an identity that is already present.
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Artifact resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResourcesConfig {
    /// Directory that logical resource names are resolved against.
    #[serde(default = "default_resources_dir")]
    pub dir: String,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            dir: default_resources_dir(),
        }
    }
}

fn default_resources_dir() -> String {
    "resources".to_string()
}

/// Host adapter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Application name the loader announces on activation.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Whether the built-in BCM pipeconfs are part of the activation set.
    #[serde(default = "default_true")]
    pub builtin_catalog: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            builtin_catalog: true,
        }
    }
}

fn default_app_name() -> String {
    "org.stratumproject.bcm-pipeconf".to_string()
}

fn default_true() -> bool {
    true
}

/// A pipeconf declared in configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipeconfEntryConfig {
    /// Unique pipeconf identity.
    pub id: String,

    /// Artifacts to fetch, in order.
    #[serde(default)]
    pub artifacts: Vec<ArtifactConfig>,
}

/// One `(kind, resource)` pair of a configured pipeconf.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactConfig {
    pub kind: ExtensionKind,
    pub resource: String,
}
