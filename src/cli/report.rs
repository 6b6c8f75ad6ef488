//! Report command implementation

use anyhow::Result;

use super::{no_records, print_json, truncate};
use crate::analytics::{compute, AnalysisConfig, AnalyticsResult, ByPeriod};
use crate::model::WorkoutSet;

pub fn run(records: &[WorkoutSet], analysis: &AnalysisConfig, json: bool) -> Result<()> {
    let result = compute(records, analysis);

    if json {
        return print_json(&result);
    }
    if records.is_empty() {
        no_records();
        return Ok(());
    }

    print_summary(&result);
    print_records(&result);
    print_balance(&result, analysis.imbalance_threshold_pct);
    print_progress(&result);

    Ok(())
}

fn print_summary(result: &AnalyticsResult) {
    let summary = &result.summary;
    println!("📊 Training summary");
    println!("{}", "-".repeat(60));
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        println!("Range:        {} to {} ({} days)", first, last, summary.date_span_days);
    }
    println!("Workouts:     {}", summary.total_workouts);
    println!("Sets:         {}", summary.total_sets);
    println!("Volume:       {:.0}", summary.total_volume);
    println!("Exercises:    {}", summary.unique_exercises);
    println!("Per week:     {:.2}", summary.avg_workouts_per_week);
    println!("Sources:      {}", summary.sources.join(", "));

    let ByPeriod { early, later, .. } = &result.frequency;
    println!(
        "Frequency:    {:.2}/week early, {:.2}/week later",
        early.sessions_per_week, later.sessions_per_week
    );

    let intensity = &result.intensity;
    let ranges: Vec<String> = intensity
        .rep_ranges
        .iter()
        .map(|r| format!("{} {:.0}%", r.label, r.percentage))
        .collect();
    println!(
        "Intensity:    avg {:.1} x {:.1}; {}",
        intensity.avg_weight,
        intensity.avg_reps,
        ranges.join(", ")
    );
}

fn print_records(result: &AnalyticsResult) {
    println!("\n🏆 Top estimated 1RMs");
    println!("{}", "-".repeat(60));
    for pr in result.personal_records.iter().take(10) {
        println!(
            "{:<32} {:>9.1} {:>9.1}",
            truncate(&pr.exercise, 32),
            pr.max_weight,
            pr.max_1rm
        );
    }
}

fn print_balance(result: &AnalyticsResult, threshold_pct: f64) {
    println!("\n⚖️  Balance");
    println!("{}", "-".repeat(60));
    for row in &result.category_volume.all {
        println!("{:<12} {:>14.0} {:>7.1}%", row.category, row.volume, row.percentage);
    }
    println!(
        "Push/pull {:.2} (early {:.2}, later {:.2})",
        result.push_pull.all.ratio, result.push_pull.early.ratio, result.push_pull.later.ratio
    );
    println!(
        "Upper/lower {:.2} (early {:.2}, later {:.2})",
        result.upper_lower.all.ratio,
        result.upper_lower.early.ratio,
        result.upper_lower.later.ratio
    );
    for imbalance in &result.imbalances {
        println!(
            "⚠️  {} at {:.1}% (below {:.0}%)",
            imbalance.category, imbalance.percentage, threshold_pct
        );
    }
}

fn print_progress(result: &AnalyticsResult) {
    println!("\n📈 Progress");
    println!("{}", "-".repeat(60));

    let change = &result.period_comparison.volume_change;
    println!("Volume early → later: {} ({:+.1}%)", change.trend, change.pct_change);

    let prs = &result.pr_comparison;
    println!(
        "PRs early → later: {} improved, {} stagnant, average {:+.1}%",
        prs.improved_count, prs.stagnant_count, prs.avg_pct
    );

    for lift in &result.lift_progression {
        println!(
            "{:<20} {:>7.1} → {:>7.1} ({:+.1}%, {} months)",
            lift.lift,
            lift.first_1rm,
            lift.last_1rm,
            lift.gain_pct,
            lift.months.len()
        );
    }

    for quarter in result.quarterly.iter().skip(1) {
        if let Some(flag) = quarter.volume_trend {
            println!(
                "{} {}: {} ({:+.1}%)",
                quarter.year, quarter.quarter, flag.trend, flag.pct_change
            );
        }
    }
}
