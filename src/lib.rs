pub mod aggregate;
pub mod analytics;
pub mod classify;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod source;

#[cfg(test)]
mod test_utils;

pub use analytics::{compute, AnalysisConfig, AnalyticsResult};
pub use config::Config;
pub use error::IngestError;
pub use ingest::{normalize, IngestOptions, RawTable};
pub use model::WorkoutSet;
pub use source::{ExportSource, SourceRegistry};
