// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `triage batch` / `triage <INPUT>`.

use std::path::PathBuf;

use tracing::info;
use triage_batch::{summary, BatchPipeline};
use triage_classifier::ClassificationEngine;
use triage_config::TriageConfig;
use triage_core::{BatchResult, TriageError};

/// Classify `input` and report the run on stdout.
///
/// The pipeline is synchronous (CSV I/O, model inference), so it runs on
/// the blocking pool.
pub async fn run_batch(
    engine: ClassificationEngine,
    config: &TriageConfig,
    input: PathBuf,
    output_name: Option<String>,
    use_color: bool,
) -> Result<(), TriageError> {
    let output_dir = PathBuf::from(&config.batch.output_dir);
    let result = tokio::task::spawn_blocking(move || {
        BatchPipeline::new(&engine, output_dir).process_batch(&input, output_name.as_deref())
    })
    .await
    .map_err(|e| TriageError::Internal(format!("batch task failed: {e}")))??;

    let line = summary(&result);
    info!(
        rows = result.row_count,
        urgent = result.urgent_count,
        duplicates = result.duplicate_count,
        "{line}"
    );
    print_report(&result, &line, use_color);
    Ok(())
}

fn print_report(result: &BatchResult, line: &str, use_color: bool) {
    println!("{line}");
    println!("  clasificados: {}", result.output_path.display());
    match &result.urgent_path {
        Some(path) if use_color => {
            use colored::Colorize;
            println!("  {} {}", "urgentes:".red().bold(), path.display());
        }
        Some(path) => println!("  urgentes:     {}", path.display()),
        None => {}
    }
}
