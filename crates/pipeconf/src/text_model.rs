// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opaque text model used by the CLI.
//!
//! The CLI only needs to know that the pipeline description is present and
//! readable; interpreting its grammar is left to real controller parsers.

use std::any::Any;
use std::sync::Arc;

use pipeconf_core::{ParseError, PipelineModel, PipelineModelParser};

/// Pipeline description kept as validated UTF-8 text.
#[derive(Debug)]
pub struct TextModel {
    pub text: String,
}

impl TextModel {
    /// Number of non-blank lines.
    pub fn line_count(&self) -> usize {
        self.text.lines().filter(|l| !l.trim().is_empty()).count()
    }
}

impl PipelineModel for TextModel {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Accepts any non-blank UTF-8 input.
#[derive(Debug, Default)]
pub struct TextModelParser;

impl PipelineModelParser for TextModelParser {
    fn parse(&self, bytes: &[u8]) -> Result<Arc<dyn PipelineModel>, ParseError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ParseError::with_source("pipeline description is not UTF-8", e))?;
        if text.trim().is_empty() {
            return Err(ParseError::new("pipeline description is empty"));
        }
        Ok(Arc::new(TextModel {
            text: text.to_string(),
        }))
    }
}
