// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-complaint flow: classify, flag, issue a ticket.

use triage_classifier::ClassificationEngine;
use triage_core::{Ticket, TriageError};
use triage_tickets::TicketIssuer;

/// A ticket issued for one complaint plus the routing line shown to the user.
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: Ticket,
    pub status: &'static str,
}

/// Routing line for a ticket of the given urgency.
pub fn status_line(urgent: bool) -> &'static str {
    if urgent {
        "URGENTE - Asignado a Agente Humano"
    } else {
        "Enviado a Sistema Automático"
    }
}

/// Issue a ticket for `text`. Blank text is ignored and yields `None`.
pub async fn submit(
    engine: &ClassificationEngine,
    issuer: &TicketIssuer,
    text: &str,
) -> Result<Option<Submission>, TriageError> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    let (category, urgent) = engine.classify_and_flag(text);
    let ticket = issuer.create_ticket(text, category, urgent).await?;
    Ok(Some(Submission {
        status: status_line(ticket.urgent),
        ticket,
    }))
}

/// `triage submit`: print the issued ticket.
pub async fn run_submit(
    engine: &ClassificationEngine,
    issuer: &TicketIssuer,
    text: &str,
    use_color: bool,
) -> Result<(), TriageError> {
    let Some(submission) = submit(engine, issuer, text).await? else {
        println!("Descripción vacía, no se creó ningún ticket.");
        return Ok(());
    };

    let ticket = &submission.ticket;
    println!(
        "Ticket #{} creado ({}): {}",
        ticket.id, ticket.source, ticket.category
    );
    if use_color && ticket.urgent {
        use colored::Colorize;
        println!("{}", submission.status.red().bold());
    } else if use_color {
        use colored::Colorize;
        println!("{}", submission.status.green());
    } else {
        println!("{}", submission.status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{Assignee, Category};
    use triage_test_utils::ScriptedInference;

    fn issuer(dir: &tempfile::TempDir) -> TicketIssuer {
        TicketIssuer::simulated(dir.path().join("tickets_db.json"))
    }

    #[tokio::test]
    async fn blank_text_issues_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let issuer = issuer(&dir);
        let engine = ClassificationEngine::keyword_only();

        for text in ["", "   ", "\n\t"] {
            assert!(submit(&engine, &issuer, text).await.unwrap().is_none());
        }
        assert!(issuer.get_tickets().await.is_empty());
    }

    #[tokio::test]
    async fn urgent_complaint_goes_to_a_human() {
        let dir = tempfile::tempdir().unwrap();
        let issuer = issuer(&dir);
        let engine = ClassificationEngine::keyword_only();

        let submission = submit(&engine, &issuer, "La pantalla no funciona!!")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(submission.ticket.id, 1000);
        assert_eq!(submission.ticket.category, Category::ProductoDefectuoso);
        assert!(submission.ticket.urgent);
        assert_eq!(submission.ticket.assigned_to, Assignee::HumanAgent);
        assert_eq!(submission.status, "URGENTE - Asignado a Agente Humano");
    }

    #[tokio::test]
    async fn routine_complaint_is_automatic() {
        let dir = tempfile::tempdir().unwrap();
        let issuer = issuer(&dir);
        let engine = ClassificationEngine::keyword_only();

        let submission = submit(&engine, &issuer, "Quiero cambiar mi contraseña")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(submission.ticket.category, Category::Cuenta);
        assert!(!submission.ticket.urgent);
        assert_eq!(submission.status, "Enviado a Sistema Automático");
    }

    #[tokio::test]
    async fn urgency_is_independent_of_the_model() {
        let dir = tempfile::tempdir().unwrap();
        let issuer = issuer(&dir);
        let model = ScriptedInference::always(Category::Otros, 0.99);
        let engine = ClassificationEngine::new(Some(Box::new(model)));

        let submission = submit(&engine, &issuer, "Es urgente, prioridad 1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(submission.ticket.category, Category::Otros);
        assert!(submission.ticket.urgent);
    }

    #[tokio::test]
    async fn ids_increase_across_submissions() {
        let dir = tempfile::tempdir().unwrap();
        let issuer = issuer(&dir);
        let engine = ClassificationEngine::keyword_only();

        let a = submit(&engine, &issuer, "uno").await.unwrap().unwrap();
        let b = submit(&engine, &issuer, "dos").await.unwrap().unwrap();
        assert_eq!(b.ticket.id, a.ticket.id + 1);
    }
}
