//! Personal records command implementation

use anyhow::Result;

use super::{no_records, print_json, truncate};
use crate::aggregate::{personal_records, RecordView, Scope};
use crate::model::WorkoutSet;

pub fn run(records: &[WorkoutSet], scope: &Scope, limit: usize, json: bool) -> Result<()> {
    let mut prs = personal_records(&RecordView::working(records), scope);
    prs.truncate(limit);

    if json {
        return print_json(&prs);
    }
    if prs.is_empty() {
        no_records();
        return Ok(());
    }

    println!("Personal records ({})\n", scope);
    println!(
        "{:<32} {:<10} {:>9} {:>9} {:>12} {:>6}  {}",
        "Exercise", "Category", "Max", "Est. 1RM", "Volume", "Sets", "Best set"
    );
    println!("{}", "-".repeat(110));

    for pr in prs {
        let best = pr
            .best_set
            .as_ref()
            .map(|b| format!("{} x {} on {}", b.weight, b.reps, b.date))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<32} {:<10} {:>9.1} {:>9.1} {:>12.0} {:>6}  {}",
            truncate(&pr.exercise, 32),
            pr.category,
            pr.max_weight,
            pr.max_1rm,
            pr.total_volume,
            pr.total_sets,
            best,
        );
    }

    Ok(())
}
