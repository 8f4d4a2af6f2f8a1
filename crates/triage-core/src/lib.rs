// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the triage complaint classifier.
//!
//! This crate provides the category taxonomy, the ticket record, the
//! workspace error type and the zero-shot inference capability trait that
//! the classifier, ticket issuer and batch pipeline build on.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TriageError;
pub use traits::ZeroShotInference;
pub use types::{
    ticket_timestamp, Assignee, BatchResult, Category, Ticket, TicketSource, TICKET_TIME_FORMAT,
};
