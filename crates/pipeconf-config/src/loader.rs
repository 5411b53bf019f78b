// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./pipeconf.toml` > `~/.config/pipeconf/pipeconf.toml` >
//! `/etc/pipeconf/pipeconf.toml`, with `PIPECONF_` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PipeconfConfig;

const SYSTEM_CONFIG: &str = "/etc/pipeconf/pipeconf.toml";
const LOCAL_CONFIG: &str = "pipeconf.toml";

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pipeconf").join(LOCAL_CONFIG))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pipeconf/pipeconf.toml`
/// 3. `~/.config/pipeconf/pipeconf.toml`
/// 4. `./pipeconf.toml`
/// 5. `PIPECONF_*` environment variables
pub fn load_config() -> Result<PipeconfConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PipeconfConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PipeconfConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
///
/// Unlike the standard hierarchy, the named file must exist.
pub fn load_config_from_path(path: &Path) -> Result<PipeconfConfig, figment::Error> {
    if !path.is_file() {
        return Err(figment::Error::from(format!(
            "config file not found: {}",
            path.display()
        )));
    }
    Figment::new()
        .merge(Serialized::defaults(PipeconfConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchical loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PipeconfConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

const ENV_SECTIONS: [&str; 4] = ["registry", "logging", "resources", "loader"];

/// Environment provider with explicit section-to-dot mapping.
///
/// `Env::split("_")` would turn `PIPECONF_REGISTRY_DUPLICATE_POLICY` into
/// `registry.duplicate.policy`; keys containing underscores need `map()`.
fn env_provider() -> Env {
    Env::prefixed("PIPECONF_").map(|key| env_key(key.as_str()).into())
}

/// Map an unprefixed env key (any case) to its dotted config path.
///
/// Only the leading section name is rewritten; unknown prefixes pass through
/// lowercased so `deny_unknown_fields` reports them.
pub(crate) fn env_key(raw: &str) -> String {
    let key = raw.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(field) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|field| !field.is_empty())
        {
            return format!("{section}.{field}");
        }
    }
    key
}

/// Path/content pairs of every config file that exists, for diagnostic spans.
pub(crate) fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![PathBuf::from(SYSTEM_CONFIG)];
    if let Some(user) = user_config_path() {
        candidates.push(user);
    }
    candidates.push(
        std::env::current_dir()
            .map(|d| d.join(LOCAL_CONFIG))
            .unwrap_or_else(|_| PathBuf::from(LOCAL_CONFIG)),
    );

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
