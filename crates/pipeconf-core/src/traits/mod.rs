// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Traits for the external collaborators of the registry.
//!
//! The registry never looks inside any of these: artifacts are opaque bytes,
//! models are opaque parse results, and strategies are opaque behaviours.

pub mod artifact;
pub mod parser;
pub mod strategy;

pub use artifact::ArtifactProvider;
pub use parser::{PipelineModel, PipelineModelParser};
pub use strategy::{Strategy, StrategyFactory};
