// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model download manager for first-run zero-shot model setup.
//!
//! Downloads the ONNX graph, tokenizer and config of a [`ModelSpec`] from
//! HuggingFace on first run and caches them under the model directory.

use std::path::{Path, PathBuf};

use tracing::info;
use triage_config::model::ModelSpec;
use triage_core::TriageError;

/// Resolves and downloads model files for one model spec.
pub struct ModelManager {
    root: PathBuf,
    spec: ModelSpec,
}

impl ModelManager {
    pub fn new(root: PathBuf, spec: ModelSpec) -> Self {
        Self { root, spec }
    }

    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    /// `<root>/<repo id with '/' replaced by "--">`.
    pub fn model_dir(&self) -> PathBuf {
        self.root.join(self.spec.name.replace('/', "--"))
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir().join("model.onnx")
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir().join("tokenizer.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.model_dir().join("config.json")
    }

    /// True if all three model files exist.
    pub fn is_model_available(&self) -> bool {
        self.model_path().exists() && self.tokenizer_path().exists() && self.config_path().exists()
    }

    /// Ensures the model files are present, downloading missing ones, and
    /// returns the model directory.
    pub async fn ensure_model(&self) -> Result<PathBuf, TriageError> {
        let model_dir = self.model_dir();
        if self.is_model_available() {
            return Ok(model_dir);
        }

        info!(model = %self.spec.name, "zero-shot model not found, downloading");

        tokio::fs::create_dir_all(&model_dir).await?;

        let files = [
            ("model.onnx", &self.spec.model_url),
            ("tokenizer.json", &self.spec.tokenizer_url),
            ("config.json", &self.spec.config_url),
        ];

        for (filename, url) in files {
            let dest = model_dir.join(filename);
            if dest.exists() {
                continue;
            }

            info!("downloading {filename}");
            match download_file(url, &dest).await {
                Ok(size) => info!("downloaded {filename} ({size} bytes)"),
                Err(e) => {
                    // Remove partial download.
                    let _ = tokio::fs::remove_file(&dest).await;
                    return Err(e);
                }
            }
        }

        info!(model = %self.spec.name, dir = %model_dir.display(), "zero-shot model ready");
        Ok(model_dir)
    }
}

async fn download_file(url: &str, dest: &Path) -> Result<usize, TriageError> {
    let response = reqwest::get(url).await.map_err(|e| TriageError::Inference {
        message: format!("failed to download {url}: {e}"),
        source: Some(Box::new(e)),
    })?;

    if !response.status().is_success() {
        return Err(TriageError::inference(format!(
            "download failed with status {}: {url}",
            response.status()
        )));
    }

    let bytes = response.bytes().await.map_err(|e| TriageError::Inference {
        message: format!("failed to read response body from {url}: {e}"),
        source: Some(Box::new(e)),
    })?;

    tokio::fs::write(dest, &bytes).await?;
    Ok(bytes.len())
}
