// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock pipeline model parser.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pipeconf_core::{ParseError, PipelineModel, PipelineModelParser};

/// Model produced by [`MockParser`]: the bytes it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockModel {
    pub source: Vec<u8>,
}

impl PipelineModel for MockModel {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Accepts any non-empty input except [`MockParser::MALFORMED`].
#[derive(Debug, Default)]
pub struct MockParser {
    calls: AtomicUsize,
}

impl MockParser {
    /// Input the parser always rejects.
    pub const MALFORMED: &'static [u8] = b"<<malformed p4info>>";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Recover the concrete model from a bundle's pipeline model.
    pub fn model_of(model: &Arc<dyn PipelineModel>) -> Option<&MockModel> {
        model.as_any().downcast_ref::<MockModel>()
    }
}

impl PipelineModelParser for MockParser {
    fn parse(&self, bytes: &[u8]) -> Result<Arc<dyn PipelineModel>, ParseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if bytes.is_empty() {
            return Err(ParseError::new("empty pipeline description"));
        }
        if bytes == Self::MALFORMED {
            return Err(ParseError::new("malformed pipeline description"));
        }
        Ok(Arc::new(MockModel {
            source: bytes.to_vec(),
        }))
    }
}
