// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-time startup selection of the inference capability.
//!
//! The Spanish model is tried first, then the multilingual fallback. If both
//! fail the engine runs keyword-only for the rest of the process; there are
//! no per-call retries.

use std::future::Future;
use std::path::PathBuf;

use tracing::{error, info, warn};
use triage_config::model::{ClassifierConfig, ModelSpec};
use triage_core::{TriageError, ZeroShotInference};

use crate::model_manager::ModelManager;
use crate::onnx::OnnxZeroShot;

/// Acquire the configured model, or `None` for keyword-only operation.
pub async fn acquire_inference(config: &ClassifierConfig) -> Option<Box<dyn ZeroShotInference>> {
    if !config.enabled {
        info!("zero-shot classifier disabled, using keyword rules only");
        return None;
    }

    let root = PathBuf::from(&config.model_dir);
    let candidates = vec![config.primary.clone(), config.fallback.clone()];
    acquire_first(candidates, |spec| load_model(root.clone(), spec, config)).await
}

/// Try `candidates` in order with `load`, returning the first success.
pub async fn acquire_first<F, Fut>(
    candidates: Vec<ModelSpec>,
    mut load: F,
) -> Option<Box<dyn ZeroShotInference>>
where
    F: FnMut(ModelSpec) -> Fut,
    Fut: Future<Output = Result<Box<dyn ZeroShotInference>, TriageError>>,
{
    let total = candidates.len();
    for (i, spec) in candidates.into_iter().enumerate() {
        let name = spec.name.clone();
        match load(spec).await {
            Ok(model) => {
                info!(model = %name, "zero-shot model loaded");
                return Some(model);
            }
            Err(e) => {
                error!(model = %name, error = %e, "failed to load zero-shot model");
                if i + 1 < total {
                    warn!("trying alternative model");
                }
            }
        }
    }

    warn!("no zero-shot model available, using keyword rules only");
    None
}

async fn load_model(
    root: PathBuf,
    spec: ModelSpec,
    config: &ClassifierConfig,
) -> Result<Box<dyn ZeroShotInference>, TriageError> {
    let manager = ModelManager::new(root, spec);
    let model_dir = if config.download {
        manager.ensure_model().await?
    } else if manager.is_model_available() {
        manager.model_dir()
    } else {
        return Err(TriageError::inference(format!(
            "model files not found in {} and downloads are disabled",
            manager.model_dir().display()
        )));
    };

    let name = manager.spec().name.clone();
    let template = config.hypothesis_template.clone();
    let model = tokio::task::spawn_blocking(move || {
        OnnxZeroShot::load(&name, &model_dir, &template)
    })
    .await
    .map_err(|e| TriageError::Internal(format!("model loading task failed: {e}")))??;

    Ok(Box::new(model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use triage_core::Category;
    use triage_test_utils::ScriptedInference;

    fn spec(name: &str) -> ModelSpec {
        ModelSpec::huggingface(name)
    }

    #[tokio::test]
    async fn primary_model_is_preferred() {
        let tried = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&tried);
        let model = acquire_first(vec![spec("a/primary"), spec("b/fallback")], move |s| {
            log.lock().unwrap().push(s.name.clone());
            async move {
                Ok(Box::new(ScriptedInference::always(Category::Otros, 1.0))
                    as Box<dyn ZeroShotInference>)
            }
        })
        .await;
        assert!(model.is_some());
        assert_eq!(*tried.lock().unwrap(), vec!["a/primary".to_string()]);
    }

    #[tokio::test]
    async fn fallback_used_when_primary_fails() {
        let tried = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&tried);
        let model = acquire_first(vec![spec("a/primary"), spec("b/fallback")], move |s| {
            log.lock().unwrap().push(s.name.clone());
            async move {
                if s.name == "a/primary" {
                    Err(TriageError::inference("no such model"))
                } else {
                    Ok(Box::new(ScriptedInference::always(Category::Otros, 1.0))
                        as Box<dyn ZeroShotInference>)
                }
            }
        })
        .await;
        assert!(model.is_some());
        assert_eq!(tried.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn keyword_only_when_every_model_fails() {
        let model = acquire_first(vec![spec("a/primary"), spec("b/fallback")], |_| async {
            Err::<Box<dyn ZeroShotInference>, _>(TriageError::inference("offline"))
        })
        .await;
        assert!(model.is_none());
    }

    #[tokio::test]
    async fn disabled_classifier_skips_loading() {
        let config = ClassifierConfig {
            enabled: false,
            ..ClassifierConfig::default()
        };
        assert!(acquire_inference(&config).await.is_none());
    }

    #[tokio::test]
    async fn missing_files_without_download_is_keyword_only() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClassifierConfig {
            model_dir: dir.path().to_string_lossy().to_string(),
            download: false,
            ..ClassifierConfig::default()
        };
        assert!(acquire_inference(&config).await.is_none());
    }
}
