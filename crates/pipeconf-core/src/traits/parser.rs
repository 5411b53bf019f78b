// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline model parser trait.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::ParseError;

/// A parsed pipeline description.
///
/// Concrete models are recovered by consumers with [`PipelineModel::as_any`].
pub trait PipelineModel: Debug + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// Turns raw pipeline-description bytes into a [`PipelineModel`].
pub trait PipelineModelParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<Arc<dyn PipelineModel>, ParseError>;
}

impl<T: PipelineModelParser + ?Sized> PipelineModelParser for Arc<T> {
    fn parse(&self, bytes: &[u8]) -> Result<Arc<dyn PipelineModel>, ParseError> {
        (**self).parse(bytes)
    }
}
