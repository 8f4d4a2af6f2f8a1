// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zero-shot inference capability.

use crate::error::TriageError;
use crate::types::Category;

/// A model that scores a text against a set of candidate categories.
///
/// Implementations return one `(category, score)` pair per candidate,
/// sorted by descending score. Implementations that are not reentrant
/// must serialize calls internally.
pub trait ZeroShotInference: Send + Sync {
    /// Human-readable model name, for logs.
    fn name(&self) -> &str;

    /// Scores `text` against `labels`.
    fn infer(&self, text: &str, labels: &[Category]) -> Result<Vec<(Category, f32)>, TriageError>;
}
