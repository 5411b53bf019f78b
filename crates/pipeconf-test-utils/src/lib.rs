// SPDX-FileCopyrightText: 2026 Pipeconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for pipeconf tests.
//!
//! # Components
//!
//! - [`MockProvider`] - In-memory artifacts that record every fetch
//! - [`MockParser`] - Parser that accepts anything except [`MockParser::MALFORMED`]
//! - [`MockStrategyFactory`] - Strategy factory that can be told to fail
//! - [`TestHarness`] - Registry, parser, and artifact source wired for activation tests
//!
//! The harness links `pipeconf-registry`, so it is meant for integration tests
//! under `tests/`; unit tests inside the registry crate use the mocks only.

pub mod harness;
pub mod mock_parser;
pub mod mock_provider;
pub mod mock_strategy;

pub use harness::{bcm_behaviours, TestHarness, TestHarnessBuilder};
pub use mock_parser::{MockModel, MockParser};
pub use mock_provider::MockProvider;
pub use mock_strategy::{MockStrategy, MockStrategyFactory};
