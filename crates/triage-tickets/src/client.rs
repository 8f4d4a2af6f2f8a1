// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Zendesk Tickets API.
//!
//! One request per ticket, authenticated with `{email}/token` basic auth.
//! Anything other than `201 Created` is an error value for the caller.

use std::time::Duration;

use tracing::debug;
use triage_config::model::ZendeskConfig;
use triage_core::{ticket_timestamp, Assignee, Category, Ticket, TicketSource, TriageError};

use crate::types::{CreateTicketRequest, CreateTicketResponse};

/// Zendesk API client.
#[derive(Debug, Clone)]
pub struct ZendeskClient {
    client: reqwest::Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl ZendeskClient {
    /// Creates a client for `base_url` (e.g. `https://acme.zendesk.com`).
    pub fn new(
        base_url: String,
        email: String,
        api_token: String,
        timeout: Duration,
    ) -> Result<Self, TriageError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TriageError::TicketBackend {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            email,
            api_token,
        })
    }

    /// Creates a client from the `[zendesk]` config section.
    pub fn from_config(config: &ZendeskConfig, timeout: Duration) -> Result<Self, TriageError> {
        let base_url = config.resolved_base_url().ok_or_else(|| {
            TriageError::Config("zendesk.subdomain or zendesk.base_url is required".into())
        })?;
        let email = config
            .email
            .clone()
            .ok_or_else(|| TriageError::Config("zendesk.email is required".into()))?;
        let api_token = config
            .api_token
            .clone()
            .ok_or_else(|| TriageError::Config("zendesk.api_token is required".into()))?;
        Self::new(base_url, email, api_token, timeout)
    }

    fn tickets_url(&self) -> String {
        format!("{}/api/v2/tickets.json", self.base_url)
    }

    /// Creates a remote ticket and maps the response into a [`Ticket`].
    ///
    /// The returned ticket is not recorded anywhere; the issuer does that.
    pub async fn create_ticket(
        &self,
        description: &str,
        category: Category,
        urgent: bool,
    ) -> Result<Ticket, TriageError> {
        let request = CreateTicketRequest::new(description, category, urgent);

        let response = self
            .client
            .post(self.tickets_url())
            .basic_auth(format!("{}/token", self.email), Some(&self.api_token))
            .json(&request)
            .send()
            .await
            .map_err(|e| TriageError::TicketBackend {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "zendesk response received");

        if status != reqwest::StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::TicketBackend {
                message: format!("Error {}: {body}", status.as_u16()),
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| TriageError::TicketBackend {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let created: CreateTicketResponse =
            serde_json::from_str(&body).map_err(|e| TriageError::TicketBackend {
                message: format!("failed to parse Zendesk response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Ticket {
            id: created.ticket.id,
            description: description.to_string(),
            category,
            urgent,
            status: created.ticket.status.unwrap_or_else(|| "open".to_string()),
            assigned_to: Assignee::for_urgency(urgent),
            created_at: created.ticket.created_at.unwrap_or_else(ticket_timestamp),
            source: TicketSource::Zendesk,
        })
    }
}
