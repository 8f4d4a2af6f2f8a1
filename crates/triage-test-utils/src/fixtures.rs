// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary CSV inputs.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// The four-row table used by the end-to-end tests.
pub const END_TO_END_CSV: &str =
    "id,descripcion\n1,Mi pedido no llegó\n2,Error en mi pago\n3,Consulta general\n4,¡Es urgente!\n";

/// A CSV input written into its own temporary directory, which doubles as
/// the output directory for batch artifacts. Removed on drop.
pub struct CsvFixture {
    dir: TempDir,
    input: PathBuf,
}

impl CsvFixture {
    /// Write `content` to `input.csv` in a fresh temporary directory.
    pub fn new(content: &str) -> std::io::Result<Self> {
        let dir = TempDir::new()?;
        let input = dir.path().join("input.csv");
        std::fs::write(&input, content)?;
        Ok(Self { dir, input })
    }

    /// Build a single-column `descripcion` table from `descriptions`.
    pub fn from_descriptions(descriptions: &[&str]) -> std::io::Result<Self> {
        let mut content = String::from("descripcion\n");
        for d in descriptions {
            content.push_str(&quote(d));
            content.push('\n');
        }
        Self::new(&content)
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Files in the fixture directory other than the input, sorted by name.
    pub fn outputs(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut out: Vec<PathBuf> = std::fs::read_dir(self.dir.path())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p != &self.input)
            .collect();
        out.sort();
        Ok(out)
    }
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
