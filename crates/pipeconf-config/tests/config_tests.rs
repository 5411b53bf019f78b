// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the pipeconf configuration system.

use pipeconf_config::diagnostic::ConfigError;
use pipeconf_config::{
    load_and_validate_path, load_and_validate_str, load_config, load_config_from_str,
};
use pipeconf_core::{DuplicatePolicy, ExtensionKind};

/// Valid TOML with every section deserializes successfully.
#[test]
fn valid_toml_deserializes_into_pipeconf_config() {
    let toml = r#"
[registry]
duplicate_policy = "replace"

[logging]
level = "debug"

[resources]
dir = "/opt/pipeconf/resources"

[loader]
app_name = "org.example.pipeconf"
builtin_catalog = false

[[pipeconfs]]
id = "org.example.pipelines.tofino"
artifacts = [
    { kind = "P4InfoText", resource = "tofino/p4info.txt" },
    { kind = "TofinoBin", resource = "tofino/pipe.bin" },
]
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.registry.duplicate_policy, DuplicatePolicy::Replace);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.resources.dir, "/opt/pipeconf/resources");
    assert_eq!(config.loader.app_name, "org.example.pipeconf");
    assert!(!config.loader.builtin_catalog);
    assert_eq!(config.pipeconfs.len(), 1);
    assert_eq!(config.pipeconfs[0].id, "org.example.pipelines.tofino");
    assert_eq!(config.pipeconfs[0].artifacts[1].kind, ExtensionKind::TofinoBin);
}

/// Empty input yields the defaults of the built-in BCM loader.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty config is valid");
    assert_eq!(config.registry.duplicate_policy, DuplicatePolicy::Reject);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.resources.dir, "resources");
    assert_eq!(config.loader.app_name, "org.stratumproject.bcm-pipeconf");
    assert!(config.loader.builtin_catalog);
    assert!(config.pipeconfs.is_empty());
}

/// A typo in a known section is reported with a suggestion.
#[test]
fn unknown_key_gets_suggestion() {
    let toml = r#"
[registry]
duplicate_polcy = "replace"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let suggestion = errors.iter().find_map(|e| match e {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => Some((key.clone(), suggestion.clone())),
        _ => None,
    });
    assert_eq!(
        suggestion,
        Some((
            "duplicate_polcy".to_string(),
            Some("duplicate_policy".to_string())
        ))
    );
}

/// An unknown policy name is rejected at deserialization time.
#[test]
fn invalid_policy_is_rejected() {
    let toml = r#"
[registry]
duplicate_policy = "overwrite"
"#;
    let errors = load_and_validate_str(toml).expect_err("unknown policy");
    assert!(!errors.is_empty());
    let rendered = errors[0].to_string();
    assert!(rendered.contains("duplicate_policy") || rendered.contains("overwrite"), "{rendered}");
}

/// An unknown extension kind in a configured pipeconf is rejected.
#[test]
fn invalid_extension_kind_is_rejected() {
    let toml = r#"
[[pipeconfs]]
id = "org.example.a"
artifacts = [{ kind = "P4InfoJson", resource = "p4info.json" }]
"#;
    assert!(load_and_validate_str(toml).is_err());
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_errors_surface_from_load_and_validate() {
    let toml = r#"
[logging]
level = "chatty"
"#;
    let errors = load_and_validate_str(toml).expect_err("bad log level");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("logging.level"))));
}

/// Local file and env overrides merge in order, env last.
#[test]
fn env_overrides_local_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "pipeconf.toml",
            r#"
[registry]
duplicate_policy = "reject"

[logging]
level = "warn"

[resources]
dir = "from-file"
"#,
        )?;
        jail.set_env("PIPECONF_REGISTRY_DUPLICATE_POLICY", "replace");
        jail.set_env("PIPECONF_LOADER_APP_NAME", "org.example.env");

        let config = load_config()?;
        assert_eq!(config.registry.duplicate_policy, DuplicatePolicy::Replace);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.resources.dir, "from-file");
        assert_eq!(config.loader.app_name, "org.example.env");
        Ok(())
    });
}

/// Every section is reachable from the environment, even with no config file.
#[test]
fn env_sets_each_section() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("PIPECONF_LOGGING_LEVEL", "debug");
        jail.set_env("PIPECONF_RESOURCES_DIR", "/srv/pipeconf");
        jail.set_env("PIPECONF_LOADER_BUILTIN_CATALOG", "false");

        let config = load_config()?;
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.resources.dir, "/srv/pipeconf");
        assert!(!config.loader.builtin_catalog);
        Ok(())
    });
}

/// A config file named explicitly must exist.
#[test]
fn explicit_missing_path_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typo.toml");
    let errors = load_and_validate_path(&path).expect_err("missing file");
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], ConfigError::Other(msg) if msg.contains("typo.toml")));
}

/// An explicit file is read and validated.
#[test]
fn explicit_path_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeconf.toml");
    std::fs::write(&path, "[registry]\nduplicate_policy = \"replace\"\n").unwrap();
    let config = load_and_validate_path(&path).unwrap();
    assert_eq!(config.registry.duplicate_policy, DuplicatePolicy::Replace);
}

/// The effective configuration serializes back to TOML for `pipeconf config`.
#[test]
fn config_round_trips_through_toml() {
    let config = load_config_from_str("[logging]\nlevel = \"trace\"\n").unwrap();
    let rendered = toml::to_string(&config).expect("serializable");
    assert!(rendered.contains("level = \"trace\""));
    assert!(rendered.contains("duplicate_policy = \"reject\""));
}
