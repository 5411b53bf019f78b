// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strategy factory trait for behaviour bindings.

use std::any::Any;
use std::fmt::Debug;

use crate::error::PipeconfError;

/// A constructed behaviour (interpreter, pipeliner, ...).
pub trait Strategy: Debug + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// Constructs the strategy bound to a capability.
///
/// Factories are stored and handed back by the registry but never invoked by it.
pub trait StrategyFactory: Send + Sync {
    /// Name of the implementation this factory produces (e.g. "BcmPipeliner").
    fn implementation(&self) -> &str;

    /// Create a new strategy instance.
    fn create(&self) -> Result<Box<dyn Strategy>, PipeconfError>;
}
