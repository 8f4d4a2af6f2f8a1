// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The batch pipeline.
//!
//! The whole input is read and validated before anything is written, so a
//! schema error leaves no artifacts behind. Rows are processed in order and
//! written in the same order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder, Writer};
use tracing::{debug, info, warn};
use triage_classifier::ClassificationEngine;
use triage_core::{BatchResult, TriageError};

/// Name of the description column, compared trimmed and case-insensitively.
const DESCRIPTION_COLUMN: &str = "descripcion";

/// Appended column holding the category label.
pub const CATEGORY_COLUMN: &str = "categoria";

/// Appended column holding `True` / `False`.
pub const URGENT_COLUMN: &str = "urgente";

/// Timestamp format embedded in artifact names.
pub const ARTIFACT_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Characters of each description echoed in the per-row log line.
const LOG_PREVIEW_CHARS: usize = 30;

/// Runs batches against one engine, writing artifacts into `output_dir`.
#[derive(Debug)]
pub struct BatchPipeline<'a> {
    engine: &'a ClassificationEngine,
    output_dir: PathBuf,
}

struct InputTable {
    headers: ByteRecord,
    description_idx: usize,
    rows: Vec<ByteRecord>,
}

impl<'a> BatchPipeline<'a> {
    pub fn new(engine: &'a ClassificationEngine, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            output_dir: output_dir.into(),
        }
    }

    /// Classify every row of `input` and write the result artifacts.
    ///
    /// `output_name` replaces the default name of the main artifact only;
    /// the urgent artifact always uses the timestamped default.
    pub fn process_batch(
        &self,
        input: &Path,
        output_name: Option<&str>,
    ) -> Result<BatchResult, TriageError> {
        let timestamp = chrono::Local::now().format(ARTIFACT_TIME_FORMAT).to_string();
        let table = read_table(input)?;

        info!(
            input = %input.display(),
            rows = table.rows.len(),
            "processing batch"
        );

        let duplicate_count = count_duplicates(&table);
        if duplicate_count > 0 {
            warn!(duplicates = duplicate_count, "duplicate descriptions in batch");
        }

        let mut augmented = Vec::with_capacity(table.rows.len());
        let mut urgent_rows = Vec::new();
        for (row, record) in table.rows.iter().enumerate() {
            let description = description_of(record, table.description_idx);
            let (category, urgent) = self.engine.classify_and_flag(&description);

            info!(
                row = row + 1,
                description = %preview(&description),
                category = %category,
                urgent,
                "row classified"
            );

            let mut out = record.clone();
            out.push_field(category.as_str().as_bytes());
            out.push_field(if urgent { b"True" } else { b"False" });
            if urgent {
                urgent_rows.push(out.clone());
            }
            augmented.push(out);
        }

        let mut headers = table.headers.clone();
        headers.push_field(CATEGORY_COLUMN.as_bytes());
        headers.push_field(URGENT_COLUMN.as_bytes());

        let output_path = match output_name {
            Some(name) => self.output_dir.join(name),
            None => self
                .output_dir
                .join(format!("tickets_clasificados_{timestamp}.csv")),
        };
        write_table(&output_path, &headers, &augmented)?;
        info!(path = %output_path.display(), "classified tickets written");

        let urgent_path = if urgent_rows.is_empty() {
            info!("no urgent tickets in batch");
            None
        } else {
            let path = self
                .output_dir
                .join(format!("tickets_urgentes_{timestamp}.csv"));
            write_table(&path, &headers, &urgent_rows)?;
            info!(
                path = %path.display(),
                urgent = urgent_rows.len(),
                "urgent tickets written"
            );
            Some(path)
        };

        Ok(BatchResult {
            row_count: augmented.len(),
            urgent_count: urgent_rows.len(),
            duplicate_count,
            output_path,
            urgent_path,
        })
    }
}

fn csv_error(context: &str, e: csv::Error) -> TriageError {
    TriageError::Csv {
        message: format!("{context}: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Read `path` fully, locate the description column and normalise row widths.
fn read_table(path: &Path) -> Result<InputTable, TriageError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(&format!("cannot open {}", path.display()), e))?;

    let headers = reader
        .byte_headers()
        .map_err(|e| csv_error("cannot read header", e))?
        .clone();

    let description_idx = headers
        .iter()
        .position(|h| {
            String::from_utf8_lossy(h)
                .trim()
                .eq_ignore_ascii_case(DESCRIPTION_COLUMN)
        })
        .ok_or_else(|| TriageError::Schema {
            message: format!(
                "no '{DESCRIPTION_COLUMN}' column in {} (found: {})",
                path.display(),
                header_names(&headers)
            ),
        })?;

    let width = headers.len();
    let mut rows = Vec::new();
    for (idx, result) in reader.byte_records().enumerate() {
        let mut record = result.map_err(|e| csv_error("cannot read row", e))?;
        if record.len() > width {
            return Err(TriageError::Csv {
                message: format!(
                    "row {} has {} fields but the header has {width}",
                    idx + 1,
                    record.len()
                ),
                source: None,
            });
        }
        while record.len() < width {
            record.push_field(b"");
        }
        rows.push(record);
    }

    debug!(columns = width, description_idx, "input table read");
    Ok(InputTable {
        headers,
        description_idx,
        rows,
    })
}

fn header_names(headers: &ByteRecord) -> String {
    headers
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Description text of a row; invalid UTF-8 is replaced, never rejected.
fn description_of(record: &ByteRecord, idx: usize) -> String {
    record
        .get(idx)
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .unwrap_or_default()
}

/// Rows whose description equals that of an earlier row.
fn count_duplicates(table: &InputTable) -> usize {
    let mut seen = HashSet::new();
    table
        .rows
        .iter()
        .filter(|record| !seen.insert(description_of(record, table.description_idx)))
        .count()
}

fn preview(description: &str) -> String {
    description.chars().take(LOG_PREVIEW_CHARS).collect()
}

fn write_table(path: &Path, headers: &ByteRecord, rows: &[ByteRecord]) -> Result<(), TriageError> {
    let context = format!("cannot write {}", path.display());
    let mut writer = Writer::from_path(path).map_err(|e| csv_error(&context, e))?;
    writer
        .write_byte_record(headers)
        .map_err(|e| csv_error(&context, e))?;
    for row in rows {
        writer
            .write_byte_record(row)
            .map_err(|e| csv_error(&context, e))?;
    }
    writer.flush()?;
    Ok(())
}
