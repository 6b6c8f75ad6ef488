//! Hevy CSV export source
//!
//! Reads workout exports written by the Hevy app.
//! Data format: one CSV per export, one row per logged set, e.g.
//! ~/hevy-exports/workouts.csv

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::{ExportRef, ExportSource};
use crate::ingest::RawTable;

pub struct HevyCsvSource {
    id: String,
    base_path: PathBuf,
    pattern: String,
}

impl HevyCsvSource {
    pub const ID: &'static str = "hevy";
    pub const DEFAULT_PATTERN: &'static str = "*.csv";

    pub fn new(id: &str, custom_path: Option<PathBuf>, pattern: Option<&str>) -> Self {
        let base_path = custom_path.unwrap_or_else(|| {
            let home = dirs::home_dir().unwrap_or_default();
            home.join("hevy-exports")
        });
        Self {
            id: id.to_string(),
            base_path,
            pattern: pattern.unwrap_or(Self::DEFAULT_PATTERN).to_string(),
        }
    }

    /// Identifier for an export: its path below the base directory
    fn export_id(&self, path: &Path) -> String {
        path.strip_prefix(&self.base_path)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

impl ExportSource for HevyCsvSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "Hevy workout CSV exports"
    }

    fn is_available(&self) -> bool {
        self.base_path.is_dir()
    }

    fn discover(&self) -> Result<Vec<ExportRef>> {
        let mut exports = vec![];

        if !self.base_path.exists() {
            return Ok(exports);
        }

        let pattern = glob::Pattern::new(&self.pattern)
            .with_context(|| format!("Invalid file pattern for {}: {}", self.id, self.pattern))?;

        for entry in walkdir::WalkDir::new(&self.base_path)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if !pattern.matches(&file_name) {
                continue;
            }
            exports.push(ExportRef {
                id: self.export_id(entry.path()),
                source_path: entry.path().to_path_buf(),
            });
        }

        exports.sort_by(|a, b| a.source_path.cmp(&b.source_path));
        Ok(exports)
    }

    fn load(&self, export: &ExportRef) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&export.source_path)
            .with_context(|| format!("Failed to open {}", export.source_path.display()))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read header of {}", export.id))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = vec![];
        for (idx, record) in reader.records().enumerate() {
            let record =
                record.with_context(|| format!("Failed to read row {} of {}", idx + 1, export.id))?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        tracing::debug!(export = %export.id, rows = rows.len(), "Loaded export");
        Ok(RawTable::new(export.id.clone(), headers, rows))
    }
}
