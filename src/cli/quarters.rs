//! Quarters command implementation

use anyhow::Result;

use super::{no_records, print_json};
use crate::aggregate::RecordView;
use crate::analytics::AnalysisConfig;
use crate::compare::quarterly_progression;
use crate::model::WorkoutSet;

pub fn run(records: &[WorkoutSet], analysis: &AnalysisConfig, json: bool) -> Result<()> {
    let quarters = quarterly_progression(
        &RecordView::raw(records),
        &analysis.key_lifts,
        analysis.top_exercises,
    );

    if json {
        return print_json(&quarters);
    }
    if quarters.is_empty() {
        no_records();
        return Ok(());
    }

    println!(
        "{:<9} {:>9} {:>6} {:>14} {:>14}  {}",
        "Quarter", "Workouts", "Sets", "Volume", "Avg/workout", "Trend"
    );
    println!("{}", "-".repeat(80));

    for quarter in &quarters {
        let trend = quarter
            .volume_trend
            .map(|t| format!("{} ({:+.1}%)", t.trend, t.pct_change))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<9} {:>9} {:>6} {:>14.0} {:>14.0}  {}",
            format!("{} {}", quarter.year, quarter.quarter),
            quarter.workouts,
            quarter.total_sets,
            quarter.total_volume,
            quarter.avg_volume_per_workout,
            trend,
        );
    }

    for quarter in &quarters {
        println!("\n{} {}", quarter.year, quarter.quarter);
        for lift in &quarter.lift_maxes {
            let max = lift
                .max_1rm
                .map(|m| format!("{:.1}", m))
                .unwrap_or_else(|| "not performed".to_string());
            let change = quarter
                .lift_changes
                .iter()
                .find(|c| c.lift == lift.lift)
                .and_then(|c| c.change)
                .map(|c| format!(" ({:+.1})", c))
                .unwrap_or_default();
            println!("   {:<20} {}{}", lift.lift, max, change);
        }
        let top: Vec<&str> = quarter
            .top_exercises
            .iter()
            .take(3)
            .map(|e| e.exercise.as_str())
            .collect();
        if !top.is_empty() {
            println!("   Top: {}", top.join(", "));
        }
    }

    Ok(())
}
