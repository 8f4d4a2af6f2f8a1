// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hybrid classification engine.
//!
//! Combines an optional zero-shot model with the keyword rules. The model's
//! top label is accepted only when its score reaches the threshold for that
//! label; otherwise, and on any inference failure, the keyword rules decide.

use tracing::{debug, error};
use triage_core::{Category, ZeroShotInference};

use crate::keyword::classify_by_keyword;
use crate::urgency::is_urgent;

/// Minimum score at which the model's top label is accepted.
///
/// `logística` and `otros` have their own entries; every other category uses
/// the default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceThresholds {
    pub logistica: f32,
    pub otros: f32,
    pub default: f32,
}

impl ConfidenceThresholds {
    /// Threshold applied when the model ranks `category` first.
    pub fn for_category(&self, category: Category) -> f32 {
        match category {
            Category::Logistica => self.logistica,
            Category::Otros => self.otros,
            _ => self.default,
        }
    }
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            logistica: 0.4,
            otros: 0.3,
            default: 0.5,
        }
    }
}

/// How a classification was reached, for logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// No model configured.
    KeywordOnly,
    /// Model top label accepted with this score.
    Model { score: f32 },
    /// Model top label scored below its threshold.
    LowConfidence { proposed: Category, score: f32 },
    /// Inference failed; keyword rules used.
    InferenceFailed,
}

/// Category classifier with a model capability chosen once at construction.
pub struct ClassificationEngine {
    inference: Option<Box<dyn ZeroShotInference>>,
    thresholds: ConfidenceThresholds,
}

impl ClassificationEngine {
    /// Engine backed by `inference`, or keyword-only when `None`.
    pub fn new(inference: Option<Box<dyn ZeroShotInference>>) -> Self {
        Self {
            inference,
            thresholds: ConfidenceThresholds::default(),
        }
    }

    /// Keyword-only engine.
    pub fn keyword_only() -> Self {
        Self::new(None)
    }

    /// Override the acceptance thresholds.
    pub fn with_thresholds(mut self, thresholds: ConfidenceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Name of the model in use, `None` when keyword-only.
    pub fn model_name(&self) -> Option<&str> {
        self.inference.as_deref().map(|m| m.name())
    }

    /// Classify `text`. Never fails.
    pub fn classify(&self, text: &str) -> Category {
        self.classify_with_decision(text).0
    }

    /// Classify `text` and report which path decided.
    pub fn classify_with_decision(&self, text: &str) -> (Category, Decision) {
        let Some(inference) = self.inference.as_deref() else {
            return (classify_by_keyword(text), Decision::KeywordOnly);
        };

        let ranked = match inference.infer(text, &Category::ALL) {
            Ok(ranked) => ranked,
            Err(e) => {
                error!(model = inference.name(), error = %e, "classification inference failed");
                return (classify_by_keyword(text), Decision::InferenceFailed);
            }
        };

        let Some(&(top_label, top_score)) = ranked.first() else {
            error!(model = inference.name(), "inference returned no labels");
            return (classify_by_keyword(text), Decision::InferenceFailed);
        };

        let threshold = self.thresholds.for_category(top_label);
        if top_score >= threshold {
            debug!(category = %top_label, score = top_score, "model label accepted");
            return (top_label, Decision::Model { score: top_score });
        }

        debug!(
            proposed = %top_label,
            score = top_score,
            threshold,
            "model confidence below threshold, using keyword rules"
        );
        (
            classify_by_keyword(text),
            Decision::LowConfidence {
                proposed: top_label,
                score: top_score,
            },
        )
    }

    /// Category and urgency of a single complaint.
    pub fn classify_and_flag(&self, text: &str) -> (Category, bool) {
        (self.classify(text), is_urgent(text))
    }
}

impl std::fmt::Debug for ClassificationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationEngine")
            .field("model", &self.model_name())
            .field("thresholds", &self.thresholds)
            .finish()
    }
}
