// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triage - customer complaint classifier and ticket issuer.
//!
//! This is the binary entry point. Passing a CSV path classifies it in batch
//! mode; subcommands cover single complaints and the ticket history.

mod batch;
mod submit;
mod tickets;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use triage_classifier::{acquire_inference, ClassificationEngine};
use triage_config::TriageConfig;
use triage_core::TriageError;

/// Triage - classify customer complaints and issue support tickets.
#[derive(Parser, Debug)]
#[command(name = "triage", version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// CSV file to classify (same as `triage batch <INPUT>`).
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a CSV file and write the result artifacts.
    Batch {
        /// Input CSV with a `descripcion` column.
        input: PathBuf,
        /// File name for the classified table (default is timestamped).
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the category and urgency of a complaint without issuing a ticket.
    Classify {
        /// Complaint text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Classify a complaint and issue a ticket for it.
    Submit {
        /// Complaint text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Inspect or clear the ticket history.
    Tickets {
        #[command(subcommand)]
        action: TicketsAction,
    },
}

#[derive(Subcommand, Debug)]
enum TicketsAction {
    /// List issued tickets in creation order.
    List,
    /// Clear the history and restart ticket ids.
    Reset,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let config = match triage_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            triage_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    if let Err(e) = run(cli, config).await {
        tracing::error!(error = %e, "triage failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: TriageConfig) -> Result<(), TriageError> {
    let use_color = std::io::stdout().is_terminal();
    match (cli.command, cli.input) {
        (Some(Commands::Batch { input, output }), _) => {
            let engine = build_engine(&config).await;
            batch::run_batch(engine, &config, input, output, use_color).await
        }
        (None, Some(input)) => {
            let engine = build_engine(&config).await;
            batch::run_batch(engine, &config, input, None, use_color).await
        }
        (Some(Commands::Classify { text }), _) => {
            let engine = build_engine(&config).await;
            let text = text.join(" ");
            let (category, urgent) = engine.classify_and_flag(&text);
            println!("categoria: {category}");
            println!("urgente:   {}", if urgent { "sí" } else { "no" });
            Ok(())
        }
        (Some(Commands::Submit { text }), _) => {
            let engine = build_engine(&config).await;
            let issuer = triage_tickets::TicketIssuer::from_config(&config).await?;
            submit::run_submit(&engine, &issuer, &text.join(" "), use_color).await
        }
        (Some(Commands::Tickets { action }), _) => {
            let issuer = triage_tickets::TicketIssuer::from_config(&config).await?;
            match action {
                TicketsAction::List => tickets::list(&issuer).await,
                TicketsAction::Reset => tickets::reset(&issuer).await,
            }
        }
        (None, None) => {
            println!("triage: use --help for available commands");
            Ok(())
        }
    }
}

/// Startup model selection happens once; the engine keeps the outcome.
async fn build_engine(config: &TriageConfig) -> ClassificationEngine {
    ClassificationEngine::new(acquire_inference(&config.classifier).await)
}

/// Initialize the tracing subscriber with the configured log level.
///
/// `RUST_LOG` takes precedence when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("triage={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
