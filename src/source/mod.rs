//! Export source trait and registry
//!
//! A source knows where a fitness app drops its exports and how to turn each
//! export file into a `RawTable`. Everything after that is source-agnostic.
//!
//! Source Status:
//! - hevy: Active (CSV exports)
//! - Any other configured id with a `base_path`: Active, read as Hevy-style CSV

mod hevy;

pub use hevy::HevyCsvSource;

use anyhow::Result;
use std::path::PathBuf;

use crate::ingest::RawTable;
use crate::Config;

/// Reference to one discovered export file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRef {
    /// Identifier carried into every record, normally the file name
    pub id: String,
    pub source_path: PathBuf,
}

/// Export source trait
pub trait ExportSource: Send + Sync {
    /// Unique identifier, matching the key under `sources:` in the config
    fn id(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Check if this source's export directory exists
    fn is_available(&self) -> bool;

    /// Discover export files, sorted by path
    fn discover(&self) -> Result<Vec<ExportRef>>;

    /// Read one export file into an untyped table
    fn load(&self, export: &ExportRef) -> Result<RawTable>;
}

/// Registry of configured sources
pub struct SourceRegistry {
    sources: Vec<Box<dyn ExportSource>>,
}

impl SourceRegistry {
    pub fn new(config: &Config) -> Self {
        let mut registry = Self { sources: vec![] };

        // Hevy is registered even without a config entry
        if config.is_source_enabled(HevyCsvSource::ID) {
            let hevy = HevyCsvSource::new(
                HevyCsvSource::ID,
                config.source_path(HevyCsvSource::ID),
                config.source_pattern(HevyCsvSource::ID),
            );
            registry.register(Box::new(hevy));
        }

        let mut extra: Vec<&str> = config
            .sources
            .keys()
            .map(|id| id.as_str())
            .filter(|id| *id != HevyCsvSource::ID)
            .collect();
        extra.sort_unstable();
        for id in extra {
            if !config.is_source_enabled(id) {
                continue;
            }
            if let Some(base_path) = config.source_path(id) {
                let source = HevyCsvSource::new(id, Some(base_path), config.source_pattern(id));
                registry.register(Box::new(source));
            }
        }

        registry
    }

    pub fn register(&mut self, source: Box<dyn ExportSource>) {
        self.sources.push(source);
    }

    pub fn available_sources(&self) -> Vec<&dyn ExportSource> {
        self.sources
            .iter()
            .filter(|s| s.is_available())
            .map(|s| s.as_ref())
            .collect()
    }

    pub fn all_sources(&self) -> Vec<&dyn ExportSource> {
        self.sources.iter().map(|s| s.as_ref()).collect()
    }

    pub fn get_source(&self, id: &str) -> Option<&dyn ExportSource> {
        self.sources
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.as_ref())
    }

    /// Load every export of every available source
    pub fn load_all(&self) -> Result<Vec<RawTable>> {
        let mut tables = vec![];
        for source in self.available_sources() {
            let exports = source.discover()?;
            tracing::info!(source = source.id(), files = exports.len(), "Discovered exports");
            for export in &exports {
                tables.push(source.load(export)?);
            }
        }
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceConfig;

    fn source_config(base_path: &std::path::Path) -> SourceConfig {
        SourceConfig {
            enabled: true,
            status: None,
            base_path: Some(base_path.display().to_string()),
            pattern: None,
        }
    }

    #[test]
    fn test_registry_registers_hevy_by_default() {
        let registry = SourceRegistry::new(&Config::default());
        let ids: Vec<&str> = registry.all_sources().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["hevy"]);
    }

    #[test]
    fn test_registry_skips_disabled_and_frozen_sources() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        let mut hevy = source_config(dir.path());
        hevy.enabled = false;
        config.sources.insert("hevy".to_string(), hevy);
        let mut strong = source_config(dir.path());
        strong.status = Some("deprecated".to_string());
        config.sources.insert("strong".to_string(), strong);
        config
            .sources
            .insert("backup".to_string(), source_config(dir.path()));

        let registry = SourceRegistry::new(&config);
        let ids: Vec<&str> = registry.all_sources().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["backup"]);
        assert!(registry.get_source("backup").unwrap().is_available());
        assert!(registry.get_source("strong").is_none());
    }

    #[test]
    fn test_load_all_reads_every_available_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.csv"),
            "title,start_time,end_time,exercise_title,set_index,set_type,weight_lbs,reps\n\
             Push,\"1 Mar 2025, 18:00\",\"1 Mar 2025, 19:00\",Bench Press,0,normal,135,5\n",
        )
        .unwrap();

        let mut config = Config::default();
        config
            .sources
            .insert("hevy".to_string(), source_config(dir.path()));
        let missing = dir.path().join("nowhere");
        config
            .sources
            .insert("other".to_string(), source_config(&missing));

        let registry = SourceRegistry::new(&config);
        assert_eq!(registry.available_sources().len(), 1);
        let tables = registry.load_all().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].source_id, "a.csv");
        assert_eq!(tables[0].rows.len(), 1);
    }
}
