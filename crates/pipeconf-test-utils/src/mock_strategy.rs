// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock strategy factory for behaviour bindings.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};

use pipeconf_core::{Capability, PipeconfError, Strategy, StrategyFactory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockStrategy {
    pub implementation: String,
}

impl Strategy for MockStrategy {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Produces [`MockStrategy`] values and counts how often it was asked to.
#[derive(Debug)]
pub struct MockStrategyFactory {
    implementation: String,
    fail: bool,
    created: AtomicUsize,
}

impl MockStrategyFactory {
    pub fn new(implementation: &str) -> Self {
        Self {
            implementation: implementation.to_string(),
            fail: false,
            created: AtomicUsize::new(0),
        }
    }

    /// A factory whose `create` always fails.
    pub fn failing(implementation: &str) -> Self {
        Self {
            fail: true,
            ..Self::new(implementation)
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl StrategyFactory for MockStrategyFactory {
    fn implementation(&self) -> &str {
        &self.implementation
    }

    fn create(&self) -> Result<Box<dyn Strategy>, PipeconfError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PipeconfError::Strategy {
                capability: Capability::new(self.implementation.as_str()),
                message: "mock factory configured to fail".to_string(),
            });
        }
        Ok(Box::new(MockStrategy {
            implementation: self.implementation.clone(),
        }))
    }
}
