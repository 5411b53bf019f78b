// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the pipeconf registry.

use thiserror::Error;

use crate::types::{Capability, PipeconfId};

/// The primary error type used across the builder, registry, and lifecycle controller.
#[derive(Debug, Error)]
pub enum PipeconfError {
    /// A declared artifact could not be fetched from the provider.
    #[error("artifact not found: {resource}")]
    ArtifactMissing {
        /// Resource name as passed to the provider.
        resource: String,
    },

    /// The pipeline description of a pipeconf failed to parse.
    #[error("invalid pipeline model for {id}: {source}")]
    PipelineModel {
        /// Pipeconf whose description was rejected.
        id: PipeconfId,
        /// Parser-reported cause.
        #[source]
        source: ParseError,
    },

    /// A bundle with this identity is already registered and the policy rejects duplicates.
    #[error("pipeconf already registered: {id}")]
    DuplicateIdentity {
        /// Identity already present in the registry.
        id: PipeconfId,
    },

    /// Invalid input: malformed identifiers, manifests, or build specs.
    #[error("configuration error: {0}")]
    Config(String),

    /// A strategy factory failed to construct its behaviour.
    #[error("cannot instantiate {capability}: {message}")]
    Strategy {
        /// Capability whose factory failed.
        capability: Capability,
        /// Factory-reported reason.
        message: String,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure reported by a [`PipelineModelParser`](crate::traits::PipelineModelParser).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ParseError {
    /// Creates a parse error with a message and no underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a parse error wrapping the parser's own error type.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Human-readable description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}
