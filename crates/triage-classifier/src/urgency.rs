// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Urgency detection.
//!
//! A complaint is urgent when any of four pattern families matches. Urgency
//! never depends on the category.

use std::sync::LazyLock;

use regex::Regex;

/// Urgency pattern families, tried in order; the first match wins.
static URGENCY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Explicit urgency words.
        Regex::new(r"(?i)\b(urgente|inmediato|cr[íi]tico|asap|necesito ayuda ya)\b").unwrap(),
        // Something is broken.
        Regex::new(r"(?i)\b(no funciona|error|fallo|roto|averiado|defectuoso|no sirve)\b").unwrap(),
        // Two or more exclamation marks in a row, either orientation.
        Regex::new(r"!\s*!+|¡\s*¡+").unwrap(),
        // Explicit priority or level 1-3.
        Regex::new(r"(?i)\b(prioridad [1-3]|nivel [1-3])\b").unwrap(),
    ]
});

/// Returns true when `text` matches any urgency pattern.
///
/// Total: empty or garbled text is simply not urgent.
pub fn is_urgent(text: &str) -> bool {
    let lower = text.to_lowercase();
    URGENCY_PATTERNS.iter().any(|pattern| pattern.is_match(&lower))
}
