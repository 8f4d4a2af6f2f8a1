// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket issuer: id allocation, ticket history and the JSON snapshot.
//!
//! The issuer is an owned instance, not process-wide state. All mutation of
//! the id counter and the ticket list happens under one async mutex, and the
//! snapshot is rewritten while that lock is held so concurrent writers never
//! interleave. Remote calls are made before taking the lock.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use triage_config::model::{TicketMode, TriageConfig};
use triage_core::{ticket_timestamp, Assignee, Category, Ticket, TicketSource, TriageError};

use crate::client::ZendeskClient;

/// First id handed out by a fresh (or reset) issuer.
pub const FIRST_TICKET_ID: u64 = 1000;

/// Where tickets are created.
#[derive(Debug)]
pub enum IssuerBackend {
    /// Tickets only exist in this process and its snapshot.
    Simulated,
    /// Tickets are created on a Zendesk instance.
    Zendesk(ZendeskClient),
}

#[derive(Debug)]
struct IssuerState {
    tickets: Vec<Ticket>,
    next_id: u64,
}

impl IssuerState {
    fn fresh() -> Self {
        Self {
            tickets: Vec::new(),
            next_id: FIRST_TICKET_ID,
        }
    }
}

/// Creates and records support tickets.
#[derive(Debug)]
pub struct TicketIssuer {
    backend: IssuerBackend,
    snapshot_path: PathBuf,
    state: Mutex<IssuerState>,
}

impl TicketIssuer {
    /// Simulated issuer with an empty history.
    pub fn simulated(snapshot_path: impl Into<PathBuf>) -> Self {
        Self::with_backend(IssuerBackend::Simulated, snapshot_path)
    }

    /// Zendesk-backed issuer with an empty history.
    pub fn zendesk(client: ZendeskClient, snapshot_path: impl Into<PathBuf>) -> Self {
        Self::with_backend(IssuerBackend::Zendesk(client), snapshot_path)
    }

    fn with_backend(backend: IssuerBackend, snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            snapshot_path: snapshot_path.into(),
            state: Mutex::new(IssuerState::fresh()),
        }
    }

    /// Builds the issuer selected by `[tickets] mode` and resumes the history
    /// stored in the snapshot, if one exists.
    pub async fn from_config(config: &TriageConfig) -> Result<Self, TriageError> {
        let issuer = match config.tickets.mode {
            TicketMode::Simulated => Self::simulated(&config.tickets.snapshot_path),
            TicketMode::Zendesk => {
                let timeout = Duration::from_secs(config.tickets.timeout_secs);
                let client = ZendeskClient::from_config(&config.zendesk, timeout)?;
                Self::zendesk(client, &config.tickets.snapshot_path)
            }
        };
        issuer.resume().await?;
        info!(mode = %issuer.mode(), snapshot = %issuer.snapshot_path.display(), "ticket issuer ready");
        Ok(issuer)
    }

    /// Loads an existing snapshot into the history. Ids continue after the
    /// highest simulated id seen, never below [`FIRST_TICKET_ID`].
    pub async fn resume(&self) -> Result<usize, TriageError> {
        let tickets = match read_snapshot(&self.snapshot_path).await? {
            Some(tickets) => tickets,
            None => return Ok(0),
        };

        let mut state = self.state.lock().await;
        state.next_id = tickets
            .iter()
            .filter(|t| t.source == TicketSource::Simulado)
            .map(|t| t.id + 1)
            .max()
            .unwrap_or(FIRST_TICKET_ID)
            .max(FIRST_TICKET_ID);
        state.tickets = tickets;
        debug!(count = state.tickets.len(), next_id = state.next_id, "resumed ticket snapshot");
        Ok(state.tickets.len())
    }

    /// The configured backend mode.
    pub fn mode(&self) -> TicketMode {
        match self.backend {
            IssuerBackend::Simulated => TicketMode::Simulated,
            IssuerBackend::Zendesk(_) => TicketMode::Zendesk,
        }
    }

    /// Path of the JSON snapshot.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Creates a ticket, records it and rewrites the snapshot.
    ///
    /// Remote rejections and transport failures come back as
    /// [`TriageError::TicketBackend`].
    pub async fn create_ticket(
        &self,
        description: &str,
        category: Category,
        urgent: bool,
    ) -> Result<Ticket, TriageError> {
        match &self.backend {
            IssuerBackend::Simulated => self.create_simulated(description, category, urgent).await,
            IssuerBackend::Zendesk(client) => {
                let ticket = client.create_ticket(description, category, urgent).await?;
                let mut state = self.state.lock().await;
                state.tickets.push(ticket.clone());
                if let Err(e) = write_snapshot(&self.snapshot_path, &state.tickets).await {
                    // The remote ticket exists regardless; keep it in history.
                    warn!(ticket_id = ticket.id, error = %e, "failed to write ticket snapshot");
                }
                info!(ticket_id = ticket.id, category = %category, urgent, "zendesk ticket created");
                Ok(ticket)
            }
        }
    }

    async fn create_simulated(
        &self,
        description: &str,
        category: Category,
        urgent: bool,
    ) -> Result<Ticket, TriageError> {
        let mut state = self.state.lock().await;

        let ticket = Ticket {
            id: state.next_id,
            description: description.to_string(),
            category,
            urgent,
            status: "open".to_string(),
            assigned_to: Assignee::for_urgency(urgent),
            created_at: ticket_timestamp(),
            source: TicketSource::Simulado,
        };

        state.tickets.push(ticket.clone());
        if let Err(e) = write_snapshot(&self.snapshot_path, &state.tickets).await {
            state.tickets.pop();
            return Err(e);
        }
        state.next_id += 1;

        info!(ticket_id = ticket.id, category = %category, urgent, "simulated ticket created");
        Ok(ticket)
    }

    /// All tickets issued so far, in creation order.
    pub async fn get_tickets(&self) -> Vec<Ticket> {
        self.state.lock().await.tickets.clone()
    }

    /// Clears the history, restarts ids at [`FIRST_TICKET_ID`] and writes
    /// the empty snapshot.
    pub async fn reset(&self) -> Result<(), TriageError> {
        let mut state = self.state.lock().await;
        *state = IssuerState::fresh();
        write_snapshot(&self.snapshot_path, &state.tickets).await?;
        info!("ticket history cleared");
        Ok(())
    }
}

async fn write_snapshot(path: &Path, tickets: &[Ticket]) -> Result<(), TriageError> {
    let json = serde_json::to_vec_pretty(tickets)
        .map_err(|e| TriageError::Internal(format!("failed to serialize tickets: {e}")))?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

async fn read_snapshot(path: &Path) -> Result<Option<Vec<Ticket>>, TriageError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let tickets = serde_json::from_slice(&bytes).map_err(|e| {
        TriageError::Config(format!(
            "ticket snapshot {} is not a ticket list: {e}",
            path.display()
        ))
    })?;
    Ok(Some(tickets))
}
