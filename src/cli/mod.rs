//! Command implementations

pub mod balance;
pub mod compare;
pub mod monthly;
pub mod prs;
pub mod quarters;
pub mod report;
pub mod sources;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::ingest::normalize;
use crate::model::WorkoutSet;
use crate::source::SourceRegistry;
use crate::Config;

/// Read every available export and normalize it into records
pub fn load_records(config: &Config, registry: &SourceRegistry) -> Result<Vec<WorkoutSet>> {
    let tables = registry.load_all()?;
    let options = config.ingest_options()?;
    let records = normalize(&tables, &options).context("Failed to normalize exports")?;
    tracing::info!(tables = tables.len(), records = records.len(), "Loaded records");
    Ok(records)
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Shorten to `max` characters, marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

fn no_records() {
    println!("No workout records found. Run 'liftlog sources' to check your exports.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Bench Press", 20), "Bench Press");
        assert_eq!(truncate("Bench Press (Barbell)", 10), "Bench P...");
        assert_eq!(truncate("Écarté à la poulie", 8), "Écart...");
    }
}
