// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints that serde attributes cannot express: credentials
//! required by the selected ticket mode, non-empty paths, and a usable
//! hypothesis template.

use crate::diagnostic::ConfigError;
use crate::model::{TicketMode, TriageConfig};

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns all collected validation errors (does not fail fast).
pub fn validate_config(config: &TriageConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.tickets.snapshot_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "tickets.snapshot_path must not be empty".to_string(),
        });
    }

    if config.tickets.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "tickets.timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.tickets.mode == TicketMode::Zendesk {
        let zendesk = &config.zendesk;
        if zendesk.resolved_base_url().is_none() {
            errors.push(ConfigError::Validation {
                message: "zendesk mode requires zendesk.subdomain or zendesk.base_url".to_string(),
            });
        }
        if is_blank(zendesk.email.as_deref()) {
            errors.push(ConfigError::Validation {
                message: "zendesk mode requires zendesk.email".to_string(),
            });
        }
        if is_blank(zendesk.api_token.as_deref()) {
            errors.push(ConfigError::Validation {
                message: "zendesk mode requires zendesk.api_token".to_string(),
            });
        }
    }

    if config.batch.output_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "batch.output_dir must not be empty".to_string(),
        });
    }

    if !config.classifier.hypothesis_template.contains("{}") {
        errors.push(ConfigError::Validation {
            message: format!(
                "classifier.hypothesis_template `{}` must contain a `{{}}` placeholder",
                config.classifier.hypothesis_template
            ),
        });
    }

    if config.classifier.enabled && config.classifier.model_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "classifier.model_dir must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
