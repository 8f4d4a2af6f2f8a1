// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch classification of complaint tables.
//!
//! [`BatchPipeline::process_batch`] reads a CSV file with a `descripcion`
//! column, appends `categoria` and `urgente` to every row and writes the
//! augmented table, plus a second table with only the urgent rows when
//! there are any.

pub mod pipeline;
pub mod summary;

pub use pipeline::{BatchPipeline, ARTIFACT_TIME_FORMAT, CATEGORY_COLUMN, URGENT_COLUMN};
pub use summary::summary;
