// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the triage classifier.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level triage configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    /// Process-level settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Zero-shot model settings.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Ticket issuance settings.
    #[serde(default)]
    pub tickets: TicketsConfig,

    /// Zendesk credentials for external ticket mode.
    #[serde(default)]
    pub zendesk: ZendeskConfig,

    /// CSV batch processing settings.
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Zero-shot classifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Try to load a model at startup. When false the engine is keyword-only.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory holding one subdirectory per downloaded model.
    #[serde(default = "default_model_dir")]
    pub model_dir: String,

    /// Download missing model files on first run.
    #[serde(default = "default_true")]
    pub download: bool,

    /// NLI hypothesis; `{}` is replaced by the category label.
    #[serde(default = "default_hypothesis_template")]
    pub hypothesis_template: String,

    /// Spanish model tried first.
    #[serde(default = "default_primary_model")]
    pub primary: ModelSpec,

    /// Multilingual model tried when the primary one cannot be loaded.
    #[serde(default = "default_fallback_model")]
    pub fallback: ModelSpec,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model_dir: default_model_dir(),
            download: true,
            hypothesis_template: default_hypothesis_template(),
            primary: default_primary_model(),
            fallback: default_fallback_model(),
        }
    }
}

/// Location of an ONNX NLI model and its companion files.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSpec {
    /// HuggingFace repository id, also used as the cache directory name.
    pub name: String,
    /// URL of the ONNX graph.
    pub model_url: String,
    /// URL of `tokenizer.json`.
    pub tokenizer_url: String,
    /// URL of `config.json` (provides `label2id`).
    pub config_url: String,
}

impl ModelSpec {
    /// Standard HuggingFace file layout for an ONNX export of `repo`.
    pub fn huggingface(repo: &str) -> Self {
        let base = format!("https://huggingface.co/{repo}/resolve/main");
        Self {
            name: repo.to_string(),
            model_url: format!("{base}/onnx/model.onnx"),
            tokenizer_url: format!("{base}/tokenizer.json"),
            config_url: format!("{base}/config.json"),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_model_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("triage").join("models"))
        .unwrap_or_else(|| std::path::PathBuf::from("models"))
        .to_string_lossy()
        .to_string()
}

fn default_hypothesis_template() -> String {
    "Este ticket trata sobre {}.".to_string()
}

fn default_primary_model() -> ModelSpec {
    ModelSpec::huggingface("Recognai/zeroshot_selectra_medium")
}

fn default_fallback_model() -> ModelSpec {
    ModelSpec::huggingface("vicgalle/xlm-roberta-large-xnli-anli")
}

/// Ticket backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketMode {
    /// In-memory issuer with a JSON snapshot.
    #[default]
    Simulated,
    /// Remote Zendesk API.
    Zendesk,
}

impl std::fmt::Display for TicketMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketMode::Simulated => write!(f, "simulated"),
            TicketMode::Zendesk => write!(f, "zendesk"),
        }
    }
}

/// Ticket issuance configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TicketsConfig {
    /// Backend used by the issuer.
    #[serde(default)]
    pub mode: TicketMode,

    /// JSON file rewritten after every issued ticket.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Timeout for remote ticket creation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TicketsConfig {
    fn default() -> Self {
        Self {
            mode: TicketMode::default(),
            snapshot_path: default_snapshot_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_snapshot_path() -> String {
    "tickets_db.json".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Zendesk API credentials.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ZendeskConfig {
    /// Account subdomain, as in `https://{subdomain}.zendesk.com`.
    #[serde(default)]
    pub subdomain: Option<String>,

    /// Agent email; authenticates as `{email}/token`.
    #[serde(default)]
    pub email: Option<String>,

    /// API token.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Overrides the URL derived from `subdomain`.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ZendeskConfig {
    /// Base URL of the Zendesk instance, without trailing slash.
    pub fn resolved_base_url(&self) -> Option<String> {
        if let Some(url) = &self.base_url {
            return Some(url.trim_end_matches('/').to_string());
        }
        self.subdomain
            .as_ref()
            .map(|s| format!("https://{s}.zendesk.com"))
    }
}

/// CSV batch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    /// Directory where result artifacts are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}
