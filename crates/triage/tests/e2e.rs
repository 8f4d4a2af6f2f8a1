// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests driving the `triage` binary.
//!
//! Every run gets its own working directory and XDG config home, and the
//! zero-shot model is disabled so nothing is downloaded.

use std::path::Path;
use std::process::{Command, Output};

use triage_test_utils::{CsvFixture, END_TO_END_CSV};

fn triage(workdir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_triage"))
        .args(args)
        .current_dir(workdir)
        .env("XDG_CONFIG_HOME", workdir.join("xdg"))
        .env("TRIAGE_CLASSIFIER_ENABLED", "false")
        .env("TRIAGE_BATCH_OUTPUT_DIR", workdir)
        .env_remove("TICKET_API_MODE")
        .env_remove("TRIAGE_TICKETS_MODE")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run triage binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn positional_input_runs_a_batch() {
    let fixture = CsvFixture::new(END_TO_END_CSV).unwrap();
    let output = triage(fixture.dir(), &[fixture.input().to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("Total tickets procesados: 4. Tickets urgentes: 2."));

    let outputs = fixture.outputs().unwrap();
    let names: Vec<String> = outputs
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .filter(|n| n.ends_with(".csv"))
        .collect();
    assert_eq!(names.len(), 2, "artifacts: {names:?}");
    assert!(names.iter().any(|n| n.starts_with("tickets_clasificados_")));
    assert!(names.iter().any(|n| n.starts_with("tickets_urgentes_")));
}

#[test]
fn batch_with_output_name() {
    let fixture = CsvFixture::from_descriptions(&["Consulta general"]).unwrap();
    let output = triage(
        fixture.dir(),
        &["batch", fixture.input().to_str().unwrap(), "--output", "salida.csv"],
    );

    assert!(output.status.success());
    let written = std::fs::read_to_string(fixture.dir().join("salida.csv")).unwrap();
    assert_eq!(written, "descripcion,categoria,urgente\nConsulta general,otros,False\n");
    assert!(stdout(&output).contains("No se encontraron tickets urgentes."));
}

#[test]
fn schema_error_exits_non_zero() {
    let fixture = CsvFixture::new("id,texto\n1,hola\n").unwrap();
    let output = triage(fixture.dir(), &[fixture.input().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("descripcion"));
    assert!(fixture.outputs().unwrap().iter().all(|p| !p.extension().is_some_and(|e| e == "csv")));
}

#[test]
fn classify_prints_category_and_urgency() {
    let dir = tempfile::tempdir().unwrap();
    let output = triage(dir.path(), &["classify", "Mi", "pedido", "no", "llegó"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("categoria: logística"));
    assert!(out.contains("urgente:   no"));
    assert!(!dir.path().join("tickets_db.json").exists());
}

#[test]
fn submit_list_and_reset_share_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();

    let first = triage(dir.path(), &["submit", "¡¡Mi tarjeta fue rechazada!!"]);
    assert!(first.status.success());
    let out = stdout(&first);
    assert!(out.contains("Ticket #1000"));
    assert!(out.contains("URGENTE - Asignado a Agente Humano"));

    let second = triage(dir.path(), &["submit", "Consulta general"]);
    assert!(stdout(&second).contains("Ticket #1001"));
    assert!(stdout(&second).contains("Enviado a Sistema Automático"));

    let listed = stdout(&triage(dir.path(), &["tickets", "list"]));
    let tickets: serde_json::Value = serde_json::from_str(&listed).unwrap();
    assert_eq!(tickets.as_array().unwrap().len(), 2);
    assert_eq!(tickets[0]["category"], "pagos");
    assert_eq!(tickets[1]["assigned_to"], "Sistema Automático");

    assert!(triage(dir.path(), &["tickets", "reset"]).status.success());
    let after = stdout(&triage(dir.path(), &["tickets", "list"]));
    assert!(after.contains("No hay tickets registrados."));

    let again = triage(dir.path(), &["submit", "Otra consulta"]);
    assert!(stdout(&again).contains("Ticket #1000"));
}

#[test]
fn invalid_config_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("triage.toml"), "[tickets]\nsnapshot_pth = \"x.json\"\n").unwrap();

    let output = triage(dir.path(), &["classify", "hola"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("snapshot_path"));
}

#[test]
fn no_arguments_prints_a_hint() {
    let dir = tempfile::tempdir().unwrap();
    let output = triage(dir.path(), &[]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("--help"));
}
