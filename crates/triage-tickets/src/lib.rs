// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket issuance for classified complaints.
//!
//! [`TicketIssuer`] owns the id counter and the ticket history. In simulated
//! mode tickets only live locally; in Zendesk mode each ticket is created
//! through [`ZendeskClient`]. Either way every issued ticket is appended to
//! the history and the JSON snapshot is rewritten.

pub mod client;
pub mod issuer;
pub mod types;

pub use client::ZendeskClient;
pub use issuer::{IssuerBackend, TicketIssuer, FIRST_TICKET_ID};
