//! Balance command implementation

use anyhow::Result;
use serde::Serialize;

use super::{no_records, print_json};
use crate::aggregate::{
    imbalances, volume_by_category, CategoryVolume, Imbalance, RecordView, Scope,
};
use crate::compare::{balance_ratios, upper_lower_ratio, PushPullBalance, UpperLowerBalance};
use crate::model::WorkoutSet;

#[derive(Serialize)]
struct BalanceReport {
    scope: Scope,
    categories: Vec<CategoryVolume>,
    push_pull: PushPullBalance,
    upper_lower: UpperLowerBalance,
    imbalances: Vec<Imbalance>,
}

pub fn run(records: &[WorkoutSet], scope: &Scope, threshold_pct: f64, json: bool) -> Result<()> {
    let view = RecordView::raw(records);
    let categories = volume_by_category(&view, scope);
    let report = BalanceReport {
        scope: *scope,
        push_pull: balance_ratios(&view, scope),
        upper_lower: upper_lower_ratio(&view, scope),
        imbalances: imbalances(&categories, threshold_pct),
        categories,
    };

    if json {
        return print_json(&report);
    }
    if report.categories.is_empty() {
        no_records();
        return Ok(());
    }

    println!("Volume by category ({})\n", scope);
    println!("{:<12} {:>14} {:>8} {:>8}", "Category", "Volume", "Sets", "Share");
    println!("{}", "-".repeat(46));
    for row in &report.categories {
        println!(
            "{:<12} {:>14.0} {:>8} {:>7.1}%",
            row.category, row.volume, row.sets, row.percentage
        );
    }

    println!();
    println!(
        "Push/pull:   {:.2} (push {:.0} / pull {:.0})",
        report.push_pull.ratio, report.push_pull.push_volume, report.push_pull.pull_volume
    );
    println!(
        "Upper/lower: {:.2} (upper {:.0} / lower {:.0})",
        report.upper_lower.ratio, report.upper_lower.upper_volume, report.upper_lower.lower_volume
    );

    if !report.imbalances.is_empty() {
        println!("\n⚠️  Below {:.0}% of total volume:", threshold_pct);
        for imbalance in &report.imbalances {
            println!("   {:<12} {:>5.1}%", imbalance.category, imbalance.percentage);
        }
    }

    Ok(())
}
