// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the builder, registry, and configuration.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::PipeconfError;

/// Globally unique identifier of a pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PipeconfId(String);

impl PipeconfId {
    /// Creates an identifier, rejecting empty or whitespace-only names.
    pub fn new(id: impl Into<String>) -> Result<Self, PipeconfError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PipeconfError::Config(
                "pipeconf id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Identifier from a compile-time constant known to be non-empty.
    pub fn from_static(id: &'static str) -> Self {
        debug_assert!(!id.trim().is_empty(), "static pipeconf id must not be empty");
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PipeconfId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PipeconfId {
    type Error = PipeconfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PipeconfId {
    type Error = PipeconfError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PipeconfId> for String {
    fn from(id: PipeconfId) -> Self {
        id.0
    }
}

/// Semantic role of a raw artifact attached to a pipeconf.
///
/// A bundle holds at most one artifact per kind.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum ExtensionKind {
    /// P4Info in protobuf text format; the pipeline description source.
    P4InfoText,
    /// Mapping of the CPU port number.
    CpuPortTxt,
    /// Stratum FPM pipeline config binary.
    StratumFpmBin,
    /// BMv2 JSON pipeline config.
    Bmv2Json,
    /// Tofino compiled pipeline binary.
    TofinoBin,
    /// Tofino context JSON emitted alongside the binary.
    TofinoContextJson,
    /// Target-specific device config passed through untouched.
    RawDeviceConfig,
}

impl ExtensionKind {
    /// The kind whose bytes are handed to the pipeline model parser.
    pub const PIPELINE_DESCRIPTION: ExtensionKind = ExtensionKind::P4InfoText;

    pub fn is_pipeline_description(self) -> bool {
        self == Self::PIPELINE_DESCRIPTION
    }
}

/// Abstract behaviour a pipeconf can provide (e.g. "interpreter").
///
/// The set is open: any name is a valid capability.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    pub const INTERPRETER: &'static str = "interpreter";
    pub const PIPELINER: &'static str = "pipeliner";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn interpreter() -> Self {
        Self::new(Self::INTERPRETER)
    }

    pub fn pipeliner() -> Self {
        Self::new(Self::PIPELINER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// What the registry does when a bundle is registered under an identity that is already present.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateIdentity` and keep the existing bundle.
    #[default]
    Reject,
    /// Atomically swap the existing bundle for the new one.
    Replace,
}
