//! Sources command implementation

use anyhow::Result;

use crate::source::SourceRegistry;
use crate::Config;

pub fn run(config: &Config, registry: &SourceRegistry) -> Result<()> {
    let sources = registry.all_sources();

    if sources.is_empty() {
        println!("No sources enabled. Check your configuration.");
        return Ok(());
    }

    println!("{:<12} {:<10} {:<8} {}", "Source", "Status", "Files", "Description");
    println!("{}", "-".repeat(60));

    for source in &sources {
        let status = config.source_status(source.id()).unwrap_or("active");
        let exports = if source.is_available() {
            source.discover()?
        } else {
            vec![]
        };
        let files = if source.is_available() {
            exports.len().to_string()
        } else {
            "-".to_string()
        };
        println!(
            "{:<12} {:<10} {:<8} {}",
            source.id(),
            status,
            files,
            source.description()
        );
        for export in &exports {
            println!("   → {}", export.source_path.display());
        }
    }

    Ok(())
}
