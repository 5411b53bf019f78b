// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pipeconf check` command implementation.
//!
//! Runs a full activation against a resource directory, prints the per-spec
//! outcome, then deactivates. Nothing outlives the command.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use pipeconf_config::PipeconfConfig;
use pipeconf_core::PipeconfError;
use pipeconf_registry::{
    ActivationReport, BehaviourBindings, DirectoryProvider, PipeconfLoader, PipeconfRegistry,
};
use serde::Serialize;
use tracing::info;

use crate::text_model::TextModelParser;

/// Structured output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct CheckSummary {
    pub app_name: String,
    pub resources: String,
    pub pipeconfs: Vec<CheckEntry>,
}

#[derive(Debug, Serialize)]
pub struct CheckEntry {
    pub id: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckSummary {
    fn new(app_name: &str, resources: &str, report: &ActivationReport) -> Self {
        let pipeconfs = report
            .outcomes
            .iter()
            .map(|o| match &o.result {
                Ok(fingerprint) => CheckEntry {
                    id: o.id.to_string(),
                    ok: true,
                    fingerprint: Some(fingerprint.clone()),
                    error: None,
                },
                Err(e) => CheckEntry {
                    id: o.id.to_string(),
                    ok: false,
                    fingerprint: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();
        Self {
            app_name: app_name.to_string(),
            resources: resources.to_string(),
            pipeconfs,
        }
    }

    pub fn all_failed(&self) -> bool {
        !self.pipeconfs.is_empty() && self.pipeconfs.iter().all(|p| !p.ok)
    }
}

/// Run the `pipeconf check` command.
///
/// Returns the summary; the caller maps a total failure to a non-zero exit.
pub fn run_check(
    config: &PipeconfConfig,
    resources: Option<PathBuf>,
    json: bool,
) -> Result<CheckSummary, PipeconfError> {
    let root = resources.unwrap_or_else(|| PathBuf::from(&config.resources.dir));
    info!(resources = %root.display(), "checking pipeconfs");

    let loader = PipeconfLoader::from_config(
        config,
        Arc::new(PipeconfRegistry::new(config.registry.duplicate_policy)),
        Arc::new(TextModelParser),
        Arc::new(DirectoryProvider::new(&root)),
        BehaviourBindings::none(),
    )?;

    let report = loader.on_activate();
    let summary = CheckSummary::new(loader.app_name(), &root.display().to_string(), &report);
    loader.on_deactivate();

    if json {
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|e| PipeconfError::Internal(format!("cannot render summary: {e}")))?;
        println!("{rendered}");
    } else {
        print_human(&summary, &report);
    }
    Ok(summary)
}

fn print_human(summary: &CheckSummary, report: &ActivationReport) {
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
    println!("{} ({})", summary.app_name.bold(), summary.resources);
    for entry in &summary.pipeconfs {
        match (&entry.fingerprint, &entry.error) {
            (Some(fp), _) => println!("  {}  {} {}", "ok".green(), entry.id, fp[..12.min(fp.len())].dimmed()),
            (_, Some(err)) => println!("  {}  {}: {err}", "FAIL".red().bold(), entry.id),
            _ => println!("  ?   {}", entry.id),
        }
    }
    println!(
        "{} registered, {} failed",
        report.succeeded().len(),
        report.failed().len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeconf_config::load_config_from_str;

    fn config_for(dir: &std::path::Path) -> PipeconfConfig {
        let mut config = load_config_from_str("").unwrap();
        config.resources.dir = dir.display().to_string();
        config
    }

    #[test]
    fn check_reports_every_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("p4info.txt"), "pkg_info {}\n").unwrap();
        std::fs::write(dir.path().join("cpu-port.txt"), "253").unwrap();
        std::fs::write(dir.path().join("bmv2.json"), "{}").unwrap();

        let summary = run_check(&config_for(dir.path()), None, true).unwrap();
        assert_eq!(summary.pipeconfs.len(), 2);
        assert!(!summary.pipeconfs[0].ok, "FPM binary is missing");
        assert!(summary.pipeconfs[0].error.as_deref().unwrap().contains("main.pb.bin"));
        assert!(summary.pipeconfs[1].ok);
        assert!(!summary.all_failed());
    }

    #[test]
    fn check_with_empty_directory_fails_everything() {
        let dir = tempfile::tempdir().unwrap();
        let summary = run_check(&config_for(dir.path()), None, true).unwrap();
        assert!(summary.all_failed());
    }

    #[test]
    fn resources_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("p4info.txt"), "pkg_info {}\n").unwrap();
        std::fs::write(dir.path().join("cpu-port.txt"), "253").unwrap();
        std::fs::write(dir.path().join("main.pb.bin"), [1u8, 2, 3]).unwrap();

        let config = load_config_from_str("").unwrap();
        let summary = run_check(&config, Some(dir.path().to_path_buf()), true).unwrap();
        assert!(summary.pipeconfs[0].ok);
        assert_eq!(summary.resources, dir.path().display().to_string());
    }

    #[test]
    fn summary_json_omits_absent_fields() {
        let entry = CheckEntry {
            id: "x".into(),
            ok: true,
            fingerprint: Some("ab".into()),
            error: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["fingerprint"], "ab");
    }
}
