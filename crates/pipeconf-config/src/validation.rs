// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::collections::HashSet;

use pipeconf_core::ExtensionKind;

use crate::diagnostic::ConfigError;
use crate::model::PipeconfConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &PipeconfConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` must be one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.resources.dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "resources.dir must not be empty".to_string(),
        });
    }

    if config.loader.app_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "loader.app_name must not be empty".to_string(),
        });
    }

    let mut seen_ids = HashSet::new();
    for (i, entry) in config.pipeconfs.iter().enumerate() {
        if entry.id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("pipeconfs[{i}].id must not be empty"),
            });
        } else if !seen_ids.insert(entry.id.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate pipeconf id `{}` in [[pipeconfs]]", entry.id),
            });
        }

        let mut seen_kinds = HashSet::new();
        for artifact in &entry.artifacts {
            if !seen_kinds.insert(artifact.kind) {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "pipeconfs[{i}] declares more than one {} artifact",
                        artifact.kind
                    ),
                });
            }
            if artifact.resource.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "pipeconfs[{i}] {} artifact has an empty resource name",
                        artifact.kind
                    ),
                });
            }
        }

        if !seen_kinds.contains(&ExtensionKind::PIPELINE_DESCRIPTION) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "pipeconfs[{i}] must declare a {} artifact",
                    ExtensionKind::PIPELINE_DESCRIPTION
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
