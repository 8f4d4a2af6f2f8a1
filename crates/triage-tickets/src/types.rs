// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zendesk Tickets API request and response types.

use serde::{Deserialize, Serialize};
use triage_core::Category;

/// Body of `POST /api/v2/tickets.json`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTicketRequest {
    pub ticket: NewTicket,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTicket {
    pub subject: String,
    pub comment: Comment,
    pub priority: Priority,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    Normal,
}

impl CreateTicketRequest {
    /// Build the request for an auto-classified complaint.
    pub fn new(description: &str, category: Category, urgent: bool) -> Self {
        let marker = if urgent { "[URGENTE] " } else { "" };
        Self {
            ticket: NewTicket {
                subject: format!("[{category}] {marker}Ticket Automático"),
                comment: Comment {
                    body: description.to_string(),
                },
                priority: if urgent {
                    Priority::Urgent
                } else {
                    Priority::Normal
                },
                tags: vec!["auto_classified".to_string(), category.to_string()],
                type_: "problem".to_string(),
            },
        }
    }
}

/// Successful creation response; only the fields the issuer keeps.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicketResponse {
    pub ticket: CreatedTicket,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTicket {
    pub id: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
