//! Configuration management with YAML support

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::analytics::AnalysisConfig;
use crate::classify::{default_major_lifts, LiftPattern};
use crate::ingest::{DateFilter, IngestOptions, DEFAULT_TIMESTAMP_FORMAT};
use crate::model::PeriodBoundary;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: HashMap<String, SourceConfig>,

    #[serde(default)]
    pub analysis: AnalysisSection,

    #[serde(default)]
    pub deduplication: DeduplicationConfig,
}

/// Individual export source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub status: Option<String>, // 'active', 'frozen', 'deprecated'

    #[serde(default)]
    pub base_path: Option<String>,

    /// File name glob, e.g. "*.csv"
    #[serde(default)]
    pub pattern: Option<String>,
}

/// Analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSection {
    /// Last month (1-12) of the early period
    #[serde(default = "default_period_boundary_month")]
    pub period_boundary_month: u32,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub from: Option<NaiveDate>,

    #[serde(default)]
    pub to: Option<NaiveDate>,

    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    #[serde(default = "default_major_lifts")]
    pub major_lifts: Vec<String>,

    /// Quarter-over-quarter lifts; the big three when unset
    #[serde(default)]
    pub key_lifts: Option<Vec<LiftPattern>>,

    #[serde(default = "default_imbalance_threshold_pct")]
    pub imbalance_threshold_pct: f64,

    #[serde(default = "default_top_exercises")]
    pub top_exercises: usize,
}

/// Deduplication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeduplicationConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

// Default value functions
fn default_enabled() -> bool {
    true
}

fn default_period_boundary_month() -> u32 {
    3
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

fn default_imbalance_threshold_pct() -> f64 {
    15.0
}

fn default_top_exercises() -> usize {
    10
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            period_boundary_month: default_period_boundary_month(),
            year: None,
            from: None,
            to: None,
            timestamp_format: default_timestamp_format(),
            major_lifts: default_major_lifts(),
            key_lifts: None,
            imbalance_threshold_pct: default_imbalance_threshold_pct(),
            top_exercises: default_top_exercises(),
        }
    }
}

impl Default for DeduplicationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Load configuration from a YAML file
    /// Searches in order:
    /// 1. Provided path
    /// 2. ./liftlog.yaml (current directory)
    /// 3. The user config directory (e.g. ~/.config/liftlog/liftlog.yaml)
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(path) = path {
            let explicit = PathBuf::from(shellexpand::tilde(path).to_string());
            if !explicit.exists() {
                anyhow::bail!("Config file not found: {}", path);
            }
            return Self::read(&explicit);
        }

        let mut search_paths = vec![PathBuf::from("liftlog.yaml")];
        if let Some(dirs) = directories::ProjectDirs::from("", "", "liftlog") {
            search_paths.push(dirs.config_dir().join("liftlog.yaml"));
        }

        for search_path in &search_paths {
            if search_path.exists() {
                return Self::read(search_path);
            }
        }

        // No config file found, use defaults
        Ok(Config::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Check if a source is enabled
    /// Returns false if:
    /// - Source is explicitly disabled
    /// - Source status is 'frozen' or 'deprecated'
    pub fn is_source_enabled(&self, source_id: &str) -> bool {
        self.sources.get(source_id).map_or(true, |s| {
            if !s.enabled {
                return false;
            }
            !matches!(s.status.as_deref(), Some("frozen") | Some("deprecated"))
        })
    }

    /// Get the base path for a source, if configured
    pub fn source_path(&self, source_id: &str) -> Option<PathBuf> {
        self.sources
            .get(source_id)
            .and_then(|s| s.base_path.as_ref())
            .map(|p| PathBuf::from(shellexpand::tilde(p).to_string()))
    }

    pub fn source_pattern(&self, source_id: &str) -> Option<&str> {
        self.sources
            .get(source_id)
            .and_then(|s| s.pattern.as_deref())
    }

    pub fn source_status(&self, source_id: &str) -> Option<&str> {
        self.sources
            .get(source_id)
            .and_then(|s| s.status.as_deref())
    }

    pub fn period_boundary(&self) -> Result<PeriodBoundary> {
        Ok(PeriodBoundary::new(self.analysis.period_boundary_month)?)
    }

    /// Options for turning raw tables into records
    pub fn ingest_options(&self) -> Result<IngestOptions> {
        Ok(IngestOptions {
            timestamp_format: self.analysis.timestamp_format.clone(),
            boundary: self.period_boundary()?,
            filter: DateFilter {
                year: self.analysis.year,
                from: self.analysis.from,
                to: self.analysis.to,
            },
            deduplicate: self.deduplication.enabled,
        })
    }

    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            major_lifts: self.analysis.major_lifts.clone(),
            key_lifts: self
                .analysis
                .key_lifts
                .clone()
                .unwrap_or_else(LiftPattern::big_three),
            imbalance_threshold_pct: self.analysis.imbalance_threshold_pct,
            top_exercises: self.analysis.top_exercises,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.deduplication.enabled);
        assert_eq!(config.analysis.period_boundary_month, 3);
        assert_eq!(config.analysis.imbalance_threshold_pct, 15.0);
        assert_eq!(config.analysis_config(), AnalysisConfig::default());
    }

    #[test]
    fn test_source_enabled_with_frozen_status() {
        let mut config = Config::default();
        config.sources.insert(
            "hevy".to_string(),
            SourceConfig {
                enabled: true,
                status: Some("frozen".to_string()),
                base_path: None,
                pattern: None,
            },
        );
        assert!(!config.is_source_enabled("hevy"));
        assert!(config.is_source_enabled("unconfigured"));
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
sources:
  hevy:
    enabled: true
    base_path: ~/exports/hevy
    pattern: "workouts*.csv"
  strong:
    enabled: false

analysis:
  period_boundary_month: 6
  year: 2025
  major_lifts: [Bench Press, Squat]
  key_lifts:
    - name: Deadlift
      include: [Deadlift]
      exclude: [Romanian]

deduplication:
  enabled: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.is_source_enabled("hevy"));
        assert!(!config.is_source_enabled("strong"));
        assert_eq!(config.source_pattern("hevy"), Some("workouts*.csv"));
        assert!(config.source_path("hevy").unwrap().ends_with("exports/hevy"));

        let options = config.ingest_options().unwrap();
        assert_eq!(options.boundary.last_early_month(), 6);
        assert_eq!(options.filter.year, Some(2025));
        assert!(!options.deduplicate);
        assert_eq!(options.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);

        let analysis = config.analysis_config();
        assert_eq!(analysis.major_lifts, vec!["Bench Press", "Squat"]);
        assert_eq!(analysis.key_lifts.len(), 1);
        assert_eq!(analysis.top_exercises, 10);
    }

    #[test]
    fn test_invalid_boundary_is_rejected() {
        let yaml = "analysis:\n  period_boundary_month: 13\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.ingest_options().is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "analysis:\n  top_exercises: 3\n").unwrap();
        let config = Config::load(path.to_str()).unwrap();
        assert_eq!(config.analysis.top_exercises, 3);

        let missing = dir.path().join("missing.yaml");
        assert!(Config::load(missing.to_str()).is_err());
    }
}
