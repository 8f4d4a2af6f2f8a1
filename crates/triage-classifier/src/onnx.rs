// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ONNX zero-shot classifier built on an NLI cross-encoder.
//!
//! Each candidate category becomes a hypothesis ("Este ticket trata sobre
//! pagos.") paired with the complaint text. The entailment logits of all
//! pairs are softmaxed against each other, so scores sum to 1 and exactly
//! one label wins.

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::TensorRef;
use tracing::debug;

use triage_core::{Category, TriageError, ZeroShotInference};

/// ONNX Runtime NLI model with its tokenizer.
pub struct OnnxZeroShot {
    name: String,
    /// ONNX Runtime session (not reentrant, one inference at a time).
    session: Mutex<Session>,
    tokenizer: tokenizers::Tokenizer,
    hypothesis_template: String,
    entailment_id: usize,
    /// BERT/ELECTRA exports take `token_type_ids`; RoBERTa-family ones do not.
    uses_token_type_ids: bool,
}

// Safety: Session is only reached through the Mutex. The tokenizer is
// thread-safe for encoding.
unsafe impl Send for OnnxZeroShot {}
unsafe impl Sync for OnnxZeroShot {}

impl OnnxZeroShot {
    /// Load `model.onnx`, `tokenizer.json` and `config.json` from `model_dir`.
    pub fn load(
        name: &str,
        model_dir: &Path,
        hypothesis_template: &str,
    ) -> Result<Self, TriageError> {
        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = tokenizers::Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            TriageError::inference(format!(
                "failed to load tokenizer from {}: {e}",
                tokenizer_path.display()
            ))
        })?;

        let config_path = model_dir.join("config.json");
        let config_text = std::fs::read_to_string(&config_path)?;
        let model_config: serde_json::Value =
            serde_json::from_str(&config_text).map_err(|e| TriageError::Inference {
                message: format!("invalid {}: {e}", config_path.display()),
                source: Some(Box::new(e)),
            })?;
        let entailment_id = entailment_index(&model_config)?;
        let uses_token_type_ids = !model_config
            .get("model_type")
            .and_then(|v| v.as_str())
            .is_some_and(|t| t.contains("roberta"));

        let model_path = model_dir.join("model.onnx");
        let session = Session::builder()
            .map_err(|e| TriageError::inference(format!("failed to create ONNX session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| TriageError::inference(format!("failed to set optimization level: {e}")))?
            .with_intra_threads(1)
            .map_err(|e| TriageError::inference(format!("failed to set thread count: {e}")))?
            .commit_from_file(&model_path)
            .map_err(|e| {
                TriageError::inference(format!(
                    "failed to load ONNX model from {}: {e}",
                    model_path.display()
                ))
            })?;

        Ok(Self {
            name: name.to_string(),
            session: Mutex::new(session),
            tokenizer,
            hypothesis_template: hypothesis_template.to_string(),
            entailment_id,
            uses_token_type_ids,
        })
    }

    fn hypothesis(&self, category: Category) -> String {
        self.hypothesis_template.replace("{}", category.as_str())
    }

    /// Entailment logit for each `(text, hypothesis)` pair, in label order.
    fn entailment_logits(&self, text: &str, labels: &[Category]) -> Result<Vec<f32>, TriageError> {
        let mut encodings = Vec::with_capacity(labels.len());
        for &label in labels {
            let hypothesis = self.hypothesis(label);
            let encoding = self
                .tokenizer
                .encode((text, hypothesis.as_str()), true)
                .map_err(|e| TriageError::inference(format!("tokenization failed: {e}")))?;
            encodings.push(encoding);
        }

        let batch = encodings.len();
        let max_len = encodings.iter().map(|e| e.len()).max().unwrap_or(0);
        let pad_id = self
            .tokenizer
            .get_padding()
            .map(|p| p.pad_id)
            .or_else(|| self.tokenizer.token_to_id("<pad>"))
            .or_else(|| self.tokenizer.token_to_id("[PAD]"))
            .unwrap_or(0) as i64;

        let mut input_ids = Vec::with_capacity(batch * max_len);
        let mut attention_mask = Vec::with_capacity(batch * max_len);
        let mut token_type_ids = Vec::with_capacity(batch * max_len);
        for encoding in &encodings {
            let pad = max_len - encoding.len();
            input_ids.extend(encoding.get_ids().iter().map(|&id| id as i64));
            input_ids.extend(std::iter::repeat_n(pad_id, pad));
            attention_mask.extend(encoding.get_attention_mask().iter().map(|&m| m as i64));
            attention_mask.extend(std::iter::repeat_n(0i64, pad));
            token_type_ids.extend(encoding.get_type_ids().iter().map(|&t| t as i64));
            token_type_ids.extend(std::iter::repeat_n(0i64, pad));
        }

        let shape = (batch, max_len);
        let to_array = |data: Vec<i64>, what: &str| {
            Array2::from_shape_vec(shape, data).map_err(|e| {
                TriageError::inference(format!("failed to create {what} tensor: {e}"))
            })
        };
        let input_ids = to_array(input_ids, "input_ids")?;
        let attention_mask = to_array(attention_mask, "attention_mask")?;
        let token_type_ids = to_array(token_type_ids, "token_type_ids")?;

        let input_ids = TensorRef::from_array_view(&input_ids).map_err(tensor_error)?;
        let attention_mask = TensorRef::from_array_view(&attention_mask).map_err(tensor_error)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| TriageError::inference(format!("failed to lock ONNX session: {e}")))?;

        let run = if self.uses_token_type_ids {
            let token_type_ids = TensorRef::from_array_view(&token_type_ids).map_err(tensor_error)?;
            session.run(ort::inputs![
                "input_ids" => input_ids,
                "attention_mask" => attention_mask,
                "token_type_ids" => token_type_ids
            ])
        } else {
            session.run(ort::inputs![
                "input_ids" => input_ids,
                "attention_mask" => attention_mask
            ])
        };
        let outputs =
            run.map_err(|e| TriageError::inference(format!("ONNX inference failed: {e}")))?;

        // Logits: [batch, num_nli_classes]
        let (out_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| TriageError::inference(format!("failed to extract logits: {e}")))?;
        let num_classes = out_shape.last().copied().unwrap_or(0) as usize;
        if num_classes <= self.entailment_id || data.len() < batch * num_classes {
            return Err(TriageError::inference(format!(
                "unexpected logits shape {out_shape:?} for {batch} hypotheses"
            )));
        }

        Ok((0..batch)
            .map(|row| data[row * num_classes + self.entailment_id])
            .collect())
    }
}

impl ZeroShotInference for OnnxZeroShot {
    fn name(&self) -> &str {
        &self.name
    }

    fn infer(&self, text: &str, labels: &[Category]) -> Result<Vec<(Category, f32)>, TriageError> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }
        let logits = self.entailment_logits(text, labels)?;
        let ranked = rank(labels, &softmax(&logits));
        debug!(model = %self.name, top = ?ranked.first(), "zero-shot scores");
        Ok(ranked)
    }
}

fn tensor_error(e: impl std::fmt::Display) -> TriageError {
    TriageError::inference(format!("failed to create TensorRef: {e}"))
}

/// Index of the entailment class, read from `label2id` (or `id2label`).
fn entailment_index(model_config: &serde_json::Value) -> Result<usize, TriageError> {
    let from_label2id = model_config
        .get("label2id")
        .and_then(|v| v.as_object())
        .and_then(|map| {
            map.iter()
                .find(|(label, _)| label.eq_ignore_ascii_case("entailment"))
                .and_then(|(_, id)| id.as_u64())
        });

    let from_id2label = || {
        model_config
            .get("id2label")
            .and_then(|v| v.as_object())
            .and_then(|map| {
                map.iter()
                    .find(|(_, label)| {
                        label
                            .as_str()
                            .is_some_and(|l| l.eq_ignore_ascii_case("entailment"))
                    })
                    .and_then(|(id, _)| id.parse::<u64>().ok())
            })
    };

    from_label2id
        .or_else(from_id2label)
        .map(|id| id as usize)
        .ok_or_else(|| TriageError::inference("model config has no 'entailment' label"))
}

/// Numerically stable softmax.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum > 0.0 {
        exps.iter().map(|e| e / sum).collect()
    } else {
        exps
    }
}

/// Pair labels with scores, highest first. Ties keep label order.
fn rank(labels: &[Category], scores: &[f32]) -> Vec<(Category, f32)> {
    let mut ranked: Vec<(Category, f32)> = labels.iter().copied().zip(scores.iter().copied()).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}
