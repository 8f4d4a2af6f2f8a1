// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the triage workspace.

use thiserror::Error;

/// The primary error type used across all triage crates.
#[derive(Debug, Error)]
pub enum TriageError {
    /// Configuration errors (invalid TOML, missing credentials, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The input table does not have the expected shape.
    ///
    /// This is the only fatal error of a batch run.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// File system errors (artifact output, ticket snapshot, model files).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// CSV decoding or encoding failed.
    #[error("csv error: {message}")]
    Csv {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Zero-shot model loading or inference failed.
    #[error("inference error: {message}")]
    Inference {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Remote ticketing backend rejected the request or was unreachable.
    #[error("{message}")]
    TicketBackend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TriageError {
    /// Shorthand for an inference failure without an underlying source.
    pub fn inference(message: impl Into<String>) -> Self {
        TriageError::Inference {
            message: message.into(),
            source: None,
        }
    }
}

impl From<std::io::Error> for TriageError {
    fn from(e: std::io::Error) -> Self {
        TriageError::Storage {
            source: Box::new(e),
        }
    }
}
