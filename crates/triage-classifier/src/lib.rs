// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Complaint classification for the triage service.
//!
//! ## Architecture
//!
//! - **Urgency**: four regex families; a complaint is urgent if any matches
//! - **Keyword**: ordered category rules, first match wins, `otros` otherwise
//! - **ClassificationEngine**: optional zero-shot model gated by per-category
//!   confidence thresholds, falling back to the keyword rules
//! - **OnnxZeroShot**: NLI cross-encoder run through ONNX Runtime
//! - **ModelManager**: first-run model download from HuggingFace
//! - **acquire_inference**: primary-then-fallback model selection at startup

pub mod acquire;
pub mod engine;
pub mod keyword;
pub mod model_manager;
pub mod onnx;
pub mod urgency;

pub use acquire::acquire_inference;
pub use engine::{ClassificationEngine, ConfidenceThresholds, Decision};
pub use keyword::classify_by_keyword;
pub use model_manager::ModelManager;
pub use onnx::OnnxZeroShot;
pub use urgency::is_urgent;
