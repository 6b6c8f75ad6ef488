//! Monthly command implementation

use anyhow::Result;

use super::{no_records, print_json};
use crate::aggregate::{monthly_rollup, RecordView};
use crate::model::WorkoutSet;

pub fn run(records: &[WorkoutSet], json: bool) -> Result<()> {
    let months = monthly_rollup(&RecordView::raw(records));

    if json {
        return print_json(&months);
    }
    if months.is_empty() {
        no_records();
        return Ok(());
    }

    println!(
        "{:<9} {:>9} {:>6} {:>14} {:>14} {:>10}",
        "Month", "Workouts", "Sets", "Volume", "Avg/workout", "Minutes"
    );
    println!("{}", "-".repeat(67));

    for month in months {
        println!(
            "{:<9} {:>9} {:>6} {:>14.0} {:>14.0} {:>10.0}",
            month.month.to_string(),
            month.distinct_workouts,
            month.total_sets,
            month.total_volume,
            month.avg_volume_per_workout,
            month.duration_minutes,
        );
    }

    Ok(())
}
