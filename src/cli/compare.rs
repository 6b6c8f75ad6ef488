//! Compare command implementation

use anyhow::Result;
use serde::Serialize;

use super::{print_json, truncate};
use crate::aggregate::{personal_records, RecordView, Scope};
use crate::compare::{period_comparison, pr_comparison, PeriodComparison, PrComparison};
use crate::model::WorkoutSet;

#[derive(Serialize)]
struct CompareReport {
    from: Scope,
    to: Scope,
    prs: PrComparison,
    periods: PeriodComparison,
}

pub fn run(records: &[WorkoutSet], from: &Scope, to: &Scope, json: bool) -> Result<()> {
    let raw = RecordView::raw(records);
    let working = raw.working_only();
    let report = CompareReport {
        from: *from,
        to: *to,
        prs: pr_comparison(
            &personal_records(&working, from),
            &personal_records(&working, to),
        ),
        periods: period_comparison(&raw.scoped(from), &raw.scoped(to)),
    };

    if json {
        return print_json(&report);
    }

    println!("{} → {}\n", from, to);
    println!("{:<24} {:>14} {:>14}", "", from.to_string(), to.to_string());
    println!("{}", "-".repeat(54));
    let (a, b) = (&report.periods.before, &report.periods.after);
    println!("{:<24} {:>14.0} {:>14.0}", "Volume", a.total_volume, b.total_volume);
    println!("{:<24} {:>14} {:>14}", "Sets", a.total_sets, b.total_sets);
    println!("{:<24} {:>14} {:>14}", "Workouts", a.workouts, b.workouts);
    println!(
        "{:<24} {:>14.2} {:>14.2}",
        "Workouts/week", a.workouts_per_week, b.workouts_per_week
    );
    println!(
        "{:<24} {:>14.0} {:>14.0}",
        "Avg volume/workout", a.avg_volume_per_workout, b.avg_volume_per_workout
    );
    println!(
        "{:<24} {:>14.0} {:>14.0}",
        "Avg minutes/workout", a.avg_duration_minutes, b.avg_duration_minutes
    );
    println!(
        "{:<24} {:>14.1} {:>14.1}",
        "Avg reps", a.intensity.avg_reps, b.intensity.avg_reps
    );

    let change = &report.periods.volume_change;
    println!("\nVolume trend: {} ({:+.1}%)", change.trend, change.pct_change);

    let variety = &report.periods.variety;
    println!(
        "Exercises: {} → {} ({} new, {} dropped)",
        variety.before,
        variety.after,
        variety.added.len(),
        variety.dropped.len()
    );

    let prs = &report.prs;
    if prs.compared.is_empty() {
        println!("\nNo exercise has rated sets in both ranges.");
    } else {
        println!(
            "\n{:<32} {:>9} {:>9} {:>8} {:>8}",
            "Exercise", "Before", "After", "Δ", "%"
        );
        println!("{}", "-".repeat(70));
        for delta in &prs.compared {
            println!(
                "{:<32} {:>9.1} {:>9.1} {:>+8.1} {:>+7.1}%",
                truncate(&delta.exercise, 32),
                delta.before_1rm,
                delta.after_1rm,
                delta.delta,
                delta.pct,
            );
        }
        println!(
            "\n{} improved, {} stagnant, average {:+.1}%",
            prs.improved_count, prs.stagnant_count, prs.avg_pct
        );
    }
    if !prs.only_in_a.is_empty() {
        println!("Only in {}: {}", from, prs.only_in_a.join(", "));
    }
    if !prs.only_in_b.is_empty() {
        println!("Only in {}: {}", to, prs.only_in_b.join(", "));
    }
    if !prs.unrated.is_empty() {
        println!("No rated set on one side: {}", prs.unrated.join(", "));
    }

    Ok(())
}
