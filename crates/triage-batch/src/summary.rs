// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use triage_core::BatchResult;

/// One-line status of a batch run, as shown to operators.
pub fn summary(result: &BatchResult) -> String {
    let mut line = format!("Total tickets procesados: {}. ", result.row_count);
    if result.duplicate_count > 0 {
        line.push_str(&format!(
            "Duplicados detectados: {}. ",
            result.duplicate_count
        ));
    }
    if result.urgent_count > 0 {
        line.push_str(&format!("Tickets urgentes: {}.", result.urgent_count));
    } else {
        line.push_str("No se encontraron tickets urgentes.");
    }
    line
}
