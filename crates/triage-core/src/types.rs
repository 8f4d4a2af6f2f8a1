// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the classifier, the ticket issuer and the batch pipeline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Complaint category from the fixed, closed taxonomy.
///
/// String forms are the Spanish labels used in CSV output, ticket snapshots
/// and model hypotheses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Category {
    #[strum(serialize = "logística")]
    #[serde(rename = "logística")]
    Logistica,
    #[strum(serialize = "pagos")]
    #[serde(rename = "pagos")]
    Pagos,
    #[strum(serialize = "producto defectuoso")]
    #[serde(rename = "producto defectuoso")]
    ProductoDefectuoso,
    #[strum(serialize = "cuenta")]
    #[serde(rename = "cuenta")]
    Cuenta,
    #[strum(serialize = "facturación")]
    #[serde(rename = "facturación")]
    Facturacion,
    #[strum(serialize = "otros")]
    #[serde(rename = "otros")]
    Otros,
}

impl Category {
    /// Every category, in canonical order. This is also the candidate label
    /// set handed to zero-shot inference.
    pub const ALL: [Category; 6] = [
        Category::Logistica,
        Category::Pagos,
        Category::ProductoDefectuoso,
        Category::Cuenta,
        Category::Facturacion,
        Category::Otros,
    ];

    /// The label as written in artifacts and hypotheses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Logistica => "logística",
            Category::Pagos => "pagos",
            Category::ProductoDefectuoso => "producto defectuoso",
            Category::Cuenta => "cuenta",
            Category::Facturacion => "facturación",
            Category::Otros => "otros",
        }
    }
}

/// Who a ticket is routed to. Derived only from the urgency flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assignee {
    #[serde(rename = "Agente Humano")]
    HumanAgent,
    #[serde(rename = "Sistema Automático")]
    AutomaticSystem,
}

impl Assignee {
    /// Urgent tickets go to a human, everything else is handled automatically.
    pub fn for_urgency(urgent: bool) -> Self {
        if urgent {
            Assignee::HumanAgent
        } else {
            Assignee::AutomaticSystem
        }
    }
}

impl std::fmt::Display for Assignee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Assignee::HumanAgent => write!(f, "Agente Humano"),
            Assignee::AutomaticSystem => write!(f, "Sistema Automático"),
        }
    }
}

/// Backend that issued a ticket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
pub enum TicketSource {
    /// In-memory issuance, no network.
    Simulado,
    /// Remote Zendesk instance.
    Zendesk,
}

/// A support ticket as recorded by the issuer and written to the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    pub description: String,
    pub category: Category,
    pub urgent: bool,
    pub status: String,
    pub assigned_to: Assignee,
    /// `YYYY-MM-DD HH:MM:SS` for simulated tickets; remote tickets keep the
    /// timestamp string returned by the backend.
    pub created_at: String,
    pub source: TicketSource,
}

/// Format used for locally generated ticket timestamps.
pub const TICKET_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TICKET_TIME_FORMAT`].
pub fn ticket_timestamp() -> String {
    chrono::Local::now().format(TICKET_TIME_FORMAT).to_string()
}

/// Summary of one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub row_count: usize,
    pub urgent_count: usize,
    pub duplicate_count: usize,
    /// Path of the full augmented table.
    pub output_path: std::path::PathBuf,
    /// Path of the urgent-only table, `None` when no row was urgent.
    pub urgent_path: Option<std::path::PathBuf>,
}
