// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic keyword classification.
//!
//! Rules are an ordered list of `(category, pattern)` pairs: the first rule
//! whose pattern matches decides. `otros` has no rule and is the fallback.

use std::sync::LazyLock;

use regex::Regex;
use triage_core::Category;

/// Ordered classification rules. Order is significant.
static CLASSIFICATION_RULES: LazyLock<Vec<(Category, Regex)>> = LazyLock::new(|| {
    vec![
        (
            Category::Logistica,
            Regex::new(r"(?i)pedido|entrega|env[íi]o|llegada|reparto|transporte|seguimiento")
                .unwrap(),
        ),
        (
            Category::Pagos,
            Regex::new(r"(?i)pago|tarjeta|cobro|d[eé]bito|cr[eé]dito|transacci[oó]n").unwrap(),
        ),
        (
            Category::ProductoDefectuoso,
            Regex::new(
                r"(?i)defectuoso|roto|rota|dañado|mal estado|no funciona|averiado|falla|pantalla",
            )
            .unwrap(),
        ),
        (
            Category::Cuenta,
            Regex::new(r"(?i)cuenta|login|registro|acceso|contraseña|usuario|perfil").unwrap(),
        ),
        (
            Category::Facturacion,
            Regex::new(r"(?i)factura|recibo|impuesto|cargo|precio|valor|subtotal").unwrap(),
        ),
    ]
});

/// Category of the first matching rule, or [`Category::Otros`].
pub fn classify_by_keyword(text: &str) -> Category {
    let lower = text.to_lowercase();
    CLASSIFICATION_RULES
        .iter()
        .find(|(_, pattern)| pattern.is_match(&lower))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Otros)
}

/// Categories that have a keyword rule, in evaluation order.
pub fn rule_order() -> Vec<Category> {
    CLASSIFICATION_RULES.iter().map(|(c, _)| *c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_sentences() {
        assert_eq!(classify_by_keyword("Mi pedido no llegó"), Category::Logistica);
        assert_eq!(classify_by_keyword("Error en mi pago"), Category::Pagos);
        assert_eq!(classify_by_keyword("Pantalla rota"), Category::ProductoDefectuoso);
        assert_eq!(
            classify_by_keyword("No puedo acceder a mi cuenta"),
            Category::Cuenta
        );
        assert_eq!(
            classify_by_keyword("Factura con impuestos incorrectos"),
            Category::Facturacion
        );
        assert_eq!(classify_by_keyword("Consulta general"), Category::Otros);
    }

    #[test]
    fn first_rule_wins() {
        // Mentions both a delivery and a payment; logistics is checked first.
        assert_eq!(
            classify_by_keyword("El pago del envío no se reflejó"),
            Category::Logistica
        );
        // Both a broken product and an account keyword.
        assert_eq!(
            classify_by_keyword("La pantalla de mi perfil está rota"),
            Category::ProductoDefectuoso
        );
    }

    #[test]
    fn matching_is_case_insensitive_and_accent_tolerant() {
        assert_eq!(classify_by_keyword("ENVIO retrasado"), Category::Logistica);
        assert_eq!(classify_by_keyword("Cobro con DÉBITO"), Category::Pagos);
        assert_eq!(classify_by_keyword("Transaccion rechazada"), Category::Pagos);
    }

    #[test]
    fn substrings_match() {
        // Rules are substring patterns, unlike the urgency families.
        assert_eq!(classify_by_keyword("pedidos atrasados"), Category::Logistica);
        assert_eq!(classify_by_keyword("facturación duplicada"), Category::Facturacion);
    }

    #[test]
    fn otros_is_never_a_rule() {
        let order = rule_order();
        assert_eq!(
            order,
            vec![
                Category::Logistica,
                Category::Pagos,
                Category::ProductoDefectuoso,
                Category::Cuenta,
                Category::Facturacion,
            ]
        );
        assert!(!order.contains(&Category::Otros));
    }

    #[test]
    fn empty_text_is_otros() {
        assert_eq!(classify_by_keyword(""), Category::Otros);
        assert_eq!(classify_by_keyword("   "), Category::Otros);
    }
}
