// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `triage tickets list|reset`.

use triage_core::TriageError;
use triage_tickets::TicketIssuer;

/// Print the ticket history as pretty JSON.
pub async fn list(issuer: &TicketIssuer) -> Result<(), TriageError> {
    let tickets = issuer.get_tickets().await;
    if tickets.is_empty() {
        println!("No hay tickets registrados.");
        return Ok(());
    }
    let json = serde_json::to_string_pretty(&tickets)
        .map_err(|e| TriageError::Internal(format!("failed to render tickets: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Clear the history.
pub async fn reset(issuer: &TicketIssuer) -> Result<(), TriageError> {
    issuer.reset().await?;
    println!("Historial de tickets borrado ({}).", issuer.snapshot_path().display());
    Ok(())
}
