// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in BCM pipeconf catalog.
//!
//! Two pipeconfs share the same P4Info and CPU port mapping and differ only in
//! the target config: the Stratum FPM binary for Broadcom switches and the
//! BMv2 JSON for the software switch.

use pipeconf_core::{ExtensionKind, PipeconfId};

use crate::manifest::{ArtifactDecl, PipeconfManifest};

/// Application name announced by the BCM loader.
pub const PIPELINE_APP_NAME: &str = "org.stratumproject.bcm-pipeconf";
pub const BCM_PIPECONF_ID: &str = "org.stratumproject.pipelines.bcm";
pub const BCM_BMV2_PIPECONF_ID: &str = "org.stratumproject.pipelines.bcm.bmv2";

pub const P4INFO_RESOURCE: &str = "p4info.txt";
pub const CPU_PORT_RESOURCE: &str = "cpu-port.txt";
pub const FPM_BIN_RESOURCE: &str = "main.pb.bin";
pub const BMV2_JSON_RESOURCE: &str = "bmv2.json";

fn decl(kind: ExtensionKind, resource: &str) -> ArtifactDecl {
    ArtifactDecl {
        kind,
        resource: resource.to_string(),
    }
}

/// Returns the manifests of the built-in pipeconfs, FPM first.
pub fn builtin_catalog() -> Vec<PipeconfManifest> {
    vec![
        PipeconfManifest {
            id: PipeconfId::from_static(BCM_PIPECONF_ID),
            description: "BCM pipeline for Stratum FPM targets".to_string(),
            artifacts: vec![
                decl(ExtensionKind::P4InfoText, P4INFO_RESOURCE),
                decl(ExtensionKind::CpuPortTxt, CPU_PORT_RESOURCE),
                decl(ExtensionKind::StratumFpmBin, FPM_BIN_RESOURCE),
            ],
        },
        PipeconfManifest {
            id: PipeconfId::from_static(BCM_BMV2_PIPECONF_ID),
            description: "BCM pipeline for the BMv2 software switch".to_string(),
            artifacts: vec![
                decl(ExtensionKind::P4InfoText, P4INFO_RESOURCE),
                decl(ExtensionKind::Bmv2Json, BMV2_JSON_RESOURCE),
                decl(ExtensionKind::CpuPortTxt, CPU_PORT_RESOURCE),
            ],
        },
    ]
}

/// Search the built-in catalog by id or description (case-insensitive).
///
/// An empty query returns every entry.
pub fn search_catalog(query: &str) -> Vec<PipeconfManifest> {
    if query.is_empty() {
        return builtin_catalog();
    }
    let query_lower = query.to_lowercase();
    builtin_catalog()
        .into_iter()
        .filter(|m| {
            m.id.as_str().to_lowercase().contains(&query_lower)
                || m.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}
