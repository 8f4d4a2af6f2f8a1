// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock zero-shot models for deterministic testing.

use std::sync::{Arc, Mutex};

use triage_core::{Category, TriageError, ZeroShotInference};

/// Recorded `(text, labels)` pairs.
pub type CallLog = Arc<Mutex<Vec<(String, Vec<Category>)>>>;

/// A model that returns the same ranking for every input.
pub struct ScriptedInference {
    ranked: Vec<(Category, f32)>,
    calls: CallLog,
}

impl ScriptedInference {
    /// Returns `ranked` as-is, so tests can also feed malformed rankings.
    pub fn with_ranking(ranked: Vec<(Category, f32)>) -> Self {
        Self {
            ranked,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Ranks `top` first with `score`; the remaining mass is split evenly
    /// across the other categories.
    pub fn always(top: Category, score: f32) -> Self {
        let rest = Category::ALL.len() as f32 - 1.0;
        let other = ((1.0 - score) / rest).max(0.0);
        let mut ranked = vec![(top, score)];
        ranked.extend(
            Category::ALL
                .iter()
                .filter(|c| **c != top)
                .map(|c| (*c, other)),
        );
        Self::with_ranking(ranked)
    }

    /// A model that ranks nothing.
    pub fn empty() -> Self {
        Self::with_ranking(Vec::new())
    }

    /// Shared handle to the call log; stays valid after the mock is boxed.
    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }
}

impl ZeroShotInference for ScriptedInference {
    fn name(&self) -> &str {
        "scripted"
    }

    fn infer(&self, text: &str, labels: &[Category]) -> Result<Vec<(Category, f32)>, TriageError> {
        self.calls
            .lock()
            .map_err(|e| TriageError::Internal(format!("call log poisoned: {e}")))?
            .push((text.to_string(), labels.to_vec()));
        Ok(self.ranked.clone())
    }
}

/// A model whose every call fails.
pub struct FailingInference {
    message: String,
}

impl FailingInference {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ZeroShotInference for FailingInference {
    fn name(&self) -> &str {
        "failing"
    }

    fn infer(&self, _text: &str, _labels: &[Category]) -> Result<Vec<(Category, f32)>, TriageError> {
        Err(TriageError::inference(self.message.clone()))
    }
}
