// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the pipeconf registry.
//!
//! This crate provides the identities, error types, and collaborator traits
//! shared by the builder, the registry, and the configuration layer.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ParseError, PipeconfError};
pub use types::{Capability, DuplicatePolicy, ExtensionKind, PipeconfId};

pub use traits::{ArtifactProvider, PipelineModel, PipelineModelParser, Strategy, StrategyFactory};

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn pipeconf_id_rejects_blank() {
        assert!(PipeconfId::new("").is_err());
        assert!(PipeconfId::new("   ").is_err());
        let id = PipeconfId::new("org.stratumproject.pipelines.bcm").unwrap();
        assert_eq!(id.as_str(), "org.stratumproject.pipelines.bcm");
        assert_eq!(id.to_string(), "org.stratumproject.pipelines.bcm");
    }

    #[test]
    fn pipeconf_id_equality_is_by_value() {
        let a = PipeconfId::new("a.b").unwrap();
        let b = PipeconfId::try_from("a.b").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pipeconf_id_serde_rejects_empty() {
        let ok: PipeconfId = serde_json::from_str("\"x.y\"").unwrap();
        assert_eq!(ok.as_str(), "x.y");
        assert!(serde_json::from_str::<PipeconfId>("\"\"").is_err());
    }

    #[test]
    fn extension_kind_display_and_parse_round_trip() {
        for kind in ExtensionKind::iter() {
            let parsed = ExtensionKind::from_str(&kind.to_string()).expect("should parse back");
            assert_eq!(kind, parsed);
        }
        assert!(ExtensionKind::from_str("Bogus").is_err());
    }

    #[test]
    fn only_p4info_is_pipeline_description() {
        let descriptions: Vec<_> = ExtensionKind::iter()
            .filter(|k| k.is_pipeline_description())
            .collect();
        assert_eq!(descriptions, vec![ExtensionKind::P4InfoText]);
    }

    #[test]
    fn duplicate_policy_parses_lowercase() {
        assert_eq!(DuplicatePolicy::from_str("reject").unwrap(), DuplicatePolicy::Reject);
        assert_eq!(DuplicatePolicy::from_str("replace").unwrap(), DuplicatePolicy::Replace);
        assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::Reject);
        let json = serde_json::to_string(&DuplicatePolicy::Replace).unwrap();
        assert_eq!(json, "\"replace\"");
    }

    #[test]
    fn capability_set_is_open() {
        let custom = Capability::new("port-statistics");
        assert_eq!(custom.as_str(), "port-statistics");
        assert_eq!(Capability::interpreter().as_str(), Capability::INTERPRETER);
        assert_ne!(Capability::interpreter(), Capability::pipeliner());
    }

    #[test]
    fn pipeline_model_error_exposes_parse_cause() {
        let io = std::io::Error::other("truncated");
        let err = PipeconfError::PipelineModel {
            id: PipeconfId::new("p").unwrap(),
            source: ParseError::with_source("bad p4info", io),
        };
        assert_eq!(err.to_string(), "invalid pipeline model for p: bad p4info");
        let cause = err.source().expect("parse error is the source");
        assert_eq!(cause.to_string(), "bad p4info");
        assert!(cause.source().is_some());
    }

    #[test]
    fn error_messages_name_the_offender() {
        let missing = PipeconfError::ArtifactMissing {
            resource: "bmv2.json".into(),
        };
        assert!(missing.to_string().contains("bmv2.json"));
        let dup = PipeconfError::DuplicateIdentity {
            id: PipeconfId::new("dup").unwrap(),
        };
        assert!(dup.to_string().contains("dup"));
    }
}
