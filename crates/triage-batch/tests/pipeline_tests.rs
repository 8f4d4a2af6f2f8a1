// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch pipeline behaviour against real CSV files.

use std::path::Path;

use tracing_test::traced_test;
use triage_batch::{summary, BatchPipeline};
use triage_classifier::ClassificationEngine;
use triage_core::{Category, TriageError};
use triage_test_utils::{CsvFixture, FailingInference, ScriptedInference, END_TO_END_CSV};

fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

const SIX_ROWS: &[&str] = &[
    "Mi pedido no llegó",
    "La pantalla llegó rota",
    "No puedo acceder a mi cuenta",
    "Mi pedido no llegó",
    "Factura con impuestos incorrectos",
    "Consulta general",
];

#[test]
fn six_rows_with_one_duplicate() {
    let fixture = CsvFixture::from_descriptions(SIX_ROWS).unwrap();
    let engine = ClassificationEngine::keyword_only();
    let pipeline = BatchPipeline::new(&engine, fixture.dir());

    let result = pipeline.process_batch(fixture.input(), None).unwrap();
    assert_eq!(result.row_count, 6);
    assert_eq!(result.duplicate_count, 1);
    assert_eq!(result.urgent_count, 0);
    assert!(result.urgent_path.is_none());

    let (headers, rows) = read_rows(&result.output_path);
    assert_eq!(headers, ["descripcion", "categoria", "urgente"]);
    let categories: Vec<&str> = rows.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(
        categories,
        [
            "logística",
            "producto defectuoso",
            "cuenta",
            "logística",
            "facturación",
            "otros"
        ]
    );
    // Duplicates are reported, never removed.
    assert_eq!(rows[0][0], rows[3][0]);
}

#[test]
fn no_urgent_rows_means_no_urgent_artifact() {
    let fixture = CsvFixture::from_descriptions(&["Consulta general", "Otra consulta"]).unwrap();
    let engine = ClassificationEngine::keyword_only();
    let result = BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), None)
        .unwrap();

    assert!(result.urgent_path.is_none());
    assert_eq!(fixture.outputs().unwrap(), vec![result.output_path.clone()]);
}

#[test]
fn end_to_end_table() {
    let fixture = CsvFixture::new(END_TO_END_CSV).unwrap();
    let engine = ClassificationEngine::keyword_only();
    let result = BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), None)
        .unwrap();

    assert_eq!(result.row_count, 4);
    assert_eq!(result.duplicate_count, 0);

    let (headers, rows) = read_rows(&result.output_path);
    assert_eq!(headers, ["id", "descripcion", "categoria", "urgente"]);
    let categories: Vec<&str> = rows.iter().map(|r| r[2].as_str()).collect();
    assert_eq!(categories, ["logística", "pagos", "otros", "otros"]);
    // "error" is a failure word, so the payment complaint is urgent as well.
    let urgent: Vec<&str> = rows.iter().map(|r| r[3].as_str()).collect();
    assert_eq!(urgent, ["False", "True", "False", "True"]);

    let urgent_path = result.urgent_path.clone().unwrap();
    let file_name = urgent_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("tickets_urgentes_"));
    let (urgent_headers, urgent_rows) = read_rows(&urgent_path);
    assert_eq!(urgent_headers, headers);
    let ids: Vec<&str> = urgent_rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(ids, ["2", "4"]);
    assert_eq!(result.urgent_count, 2);
}

#[test]
fn artifacts_share_one_timestamp() {
    let fixture = CsvFixture::new(END_TO_END_CSV).unwrap();
    let engine = ClassificationEngine::keyword_only();
    let result = BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), None)
        .unwrap();

    let main = result.output_path.file_name().unwrap().to_string_lossy().to_string();
    let urgent = result.urgent_path.unwrap().file_name().unwrap().to_string_lossy().to_string();
    let main_ts = main
        .strip_prefix("tickets_clasificados_")
        .and_then(|s| s.strip_suffix(".csv"))
        .unwrap();
    let urgent_ts = urgent
        .strip_prefix("tickets_urgentes_")
        .and_then(|s| s.strip_suffix(".csv"))
        .unwrap();
    assert_eq!(main_ts, urgent_ts);
    assert_eq!(main_ts.len(), "20260101_120000".len());
}

#[test]
fn explicit_output_name_replaces_main_artifact_only() {
    let fixture = CsvFixture::new(END_TO_END_CSV).unwrap();
    let engine = ClassificationEngine::keyword_only();
    let result = BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), Some("resultado.csv"))
        .unwrap();

    assert_eq!(result.output_path, fixture.dir().join("resultado.csv"));
    assert!(result.output_path.exists());
    let urgent = result.urgent_path.unwrap();
    assert!(
        urgent
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("tickets_urgentes_")
    );
}

#[test]
fn missing_description_column_is_fatal_and_writes_nothing() {
    let fixture = CsvFixture::new("id,texto\n1,hola\n").unwrap();
    let engine = ClassificationEngine::keyword_only();
    let err = BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), None)
        .unwrap_err();

    assert!(matches!(err, TriageError::Schema { .. }));
    assert!(err.to_string().contains("descripcion"));
    assert!(fixture.outputs().unwrap().is_empty());
}

#[test]
fn extra_columns_pass_through_unchanged() {
    let fixture = CsvFixture::new(
        "cliente,DESCRIPCION,canal\n\"Pérez, Ana\",Pago rechazado,web\n7,\"Dijo \"\"hola\"\"\",tel\n",
    )
    .unwrap();
    let engine = ClassificationEngine::keyword_only();
    let result = BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), None)
        .unwrap();

    let (headers, rows) = read_rows(&result.output_path);
    assert_eq!(headers, ["cliente", "DESCRIPCION", "canal", "categoria", "urgente"]);
    assert_eq!(rows[0], ["Pérez, Ana", "Pago rechazado", "web", "pagos", "False"]);
    assert_eq!(rows[1], ["7", "Dijo \"hola\"", "tel", "otros", "False"]);
}

#[test]
fn over_long_row_is_a_csv_error_and_writes_nothing() {
    let fixture = CsvFixture::new("id,descripcion\n1,hola,extra\n").unwrap();
    let engine = ClassificationEngine::keyword_only();
    let err = BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), None)
        .unwrap_err();

    assert!(matches!(err, TriageError::Csv { .. }), "got: {err:?}");
    assert!(err.to_string().contains("row 1 has 3 fields"));
    assert!(fixture.outputs().unwrap().is_empty());
}

#[test]
fn short_rows_are_padded() {
    let fixture = CsvFixture::new("descripcion,canal\nConsulta general\n").unwrap();
    let engine = ClassificationEngine::keyword_only();
    let result = BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), None)
        .unwrap();

    let (_, rows) = read_rows(&result.output_path);
    assert_eq!(rows[0], ["Consulta general", "", "otros", "False"]);
}

#[test]
fn empty_descriptions_degrade_to_otros() {
    let fixture = CsvFixture::new("id,descripcion\n1,\n2,\n").unwrap();
    let engine = ClassificationEngine::keyword_only();
    let result = BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), None)
        .unwrap();

    assert_eq!(result.row_count, 2);
    assert_eq!(result.duplicate_count, 1);
    let (_, rows) = read_rows(&result.output_path);
    assert!(rows.iter().all(|r| r[2] == "otros" && r[3] == "False"));
}

#[test]
fn confident_model_labels_reach_the_artifact() {
    let fixture = CsvFixture::from_descriptions(&["Consulta general"]).unwrap();
    let model = ScriptedInference::always(Category::Facturacion, 0.8);
    let engine = ClassificationEngine::new(Some(Box::new(model)));
    let result = BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), None)
        .unwrap();

    let (_, rows) = read_rows(&result.output_path);
    assert_eq!(rows[0][1], "facturación");
}

#[test]
#[traced_test]
fn failing_model_does_not_stop_the_batch() {
    let fixture = CsvFixture::from_descriptions(&["Mi pedido no llegó", "Consulta general"]).unwrap();
    let engine = ClassificationEngine::new(Some(Box::new(FailingInference::new("session died"))));
    let result = BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), None)
        .unwrap();

    assert_eq!(result.row_count, 2);
    let (_, rows) = read_rows(&result.output_path);
    assert_eq!(rows[0][1], "logística");
    assert!(logs_contain("classification inference failed"));
}

#[test]
#[traced_test]
fn duplicates_are_logged() {
    let fixture = CsvFixture::from_descriptions(SIX_ROWS).unwrap();
    let engine = ClassificationEngine::keyword_only();
    BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), None)
        .unwrap();
    assert!(logs_contain("duplicate descriptions in batch"));
}

#[test]
fn summary_line_for_end_to_end() {
    let fixture = CsvFixture::new(END_TO_END_CSV).unwrap();
    let engine = ClassificationEngine::keyword_only();
    let result = BatchPipeline::new(&engine, fixture.dir())
        .process_batch(fixture.input(), None)
        .unwrap();
    assert_eq!(
        summary(&result),
        "Total tickets procesados: 4. Tickets urgentes: 2."
    );
}
