// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for triage integration tests.
//!
//! Provides deterministic inference mocks and CSV fixtures so tests never
//! need a downloaded model.
//!
//! # Components
//!
//! - [`ScriptedInference`] - returns a fixed ranking and records every call
//! - [`FailingInference`] - always returns an inference error
//! - [`CsvFixture`] - CSV input file inside a temporary directory

pub mod fixtures;
pub mod mock_inference;

pub use fixtures::{CsvFixture, END_TO_END_CSV};
pub use mock_inference::{FailingInference, ScriptedInference};
