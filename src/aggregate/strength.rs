//! Strength statistics: personal records, intensity and lift progression

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{RecordView, Scope};
use crate::classify::{Category, LiftPattern};
use crate::metrics::RepRange;
use crate::model::MonthBucket;

/// The set that produced an exercise's best estimated 1RM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSet {
    pub weight: f64,
    pub reps: u32,
    pub date: NaiveDate,
    pub estimated_1rm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub exercise: String,
    pub category: Category,
    pub max_weight: f64,
    pub max_1rm: f64,
    pub total_volume: f64,
    pub total_sets: usize,
    pub best_set: Option<BestSet>,
}

/// Per-exercise records within `scope`, best estimated 1RM first
pub fn personal_records(view: &RecordView, scope: &Scope) -> Vec<PersonalRecord> {
    let mut by_exercise: BTreeMap<&str, PersonalRecord> = BTreeMap::new();

    for set in view.scoped(scope).iter() {
        let record = by_exercise
            .entry(set.exercise_name.as_str())
            .or_insert_with(|| PersonalRecord {
                exercise: set.exercise_name.clone(),
                category: set.category,
                max_weight: 0.0,
                max_1rm: 0.0,
                total_volume: 0.0,
                total_sets: 0,
                best_set: None,
            });

        record.max_weight = record.max_weight.max(set.weight);
        record.total_volume += set.volume;
        record.total_sets += 1;
        if record.best_set.is_none() || set.estimated_1rm > record.max_1rm {
            record.max_1rm = set.estimated_1rm;
            record.best_set = Some(BestSet {
                weight: set.weight,
                reps: set.reps,
                date: set.date,
                estimated_1rm: set.estimated_1rm,
            });
        }
    }

    let mut records: Vec<PersonalRecord> = by_exercise.into_values().collect();
    records.sort_by(|a, b| {
        b.max_1rm
            .total_cmp(&a.max_1rm)
            .then_with(|| a.exercise.cmp(&b.exercise))
    });
    records
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepRangeShare {
    pub range: RepRange,
    pub label: String,
    pub sets: usize,
    pub percentage: f64,
}

/// Load and rep profile of a set of (usually working) sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intensity {
    pub sets: usize,
    pub avg_weight: f64,
    pub avg_reps: f64,
    pub rep_ranges: Vec<RepRangeShare>,
}

pub fn intensity(view: &RecordView) -> Intensity {
    let sets = view.len();
    let mut counts: BTreeMap<RepRange, usize> = BTreeMap::new();
    let mut weight_sum = 0.0;
    let mut reps_sum = 0.0;

    for set in view.iter() {
        weight_sum += set.weight;
        reps_sum += set.reps as f64;
        *counts.entry(RepRange::of(set.reps)).or_insert(0) += 1;
    }

    let share = |n: usize| if sets > 0 { n as f64 / sets as f64 * 100.0 } else { 0.0 };
    let rep_ranges = RepRange::ALL
        .iter()
        .map(|range| {
            let n = counts.get(range).copied().unwrap_or(0);
            RepRangeShare {
                range: *range,
                label: range.label().to_string(),
                sets: n,
                percentage: share(n),
            }
        })
        .collect();

    Intensity {
        sets,
        avg_weight: if sets > 0 { weight_sum / sets as f64 } else { 0.0 },
        avg_reps: if sets > 0 { reps_sum / sets as f64 } else { 0.0 },
        rep_ranges,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftMonth {
    pub month: MonthBucket,
    pub max_weight: f64,
    pub max_1rm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftProgression {
    pub lift: String,
    pub months: Vec<LiftMonth>,
    pub first_1rm: f64,
    pub last_1rm: f64,
    pub gain: f64,
    /// 0 when the first month's 1RM is 0
    pub gain_pct: f64,
}

/// Month-by-month best for one lift; `None` when the lift never appears
pub fn lift_progression(view: &RecordView, pattern: &LiftPattern) -> Option<LiftProgression> {
    let mut by_month: BTreeMap<MonthBucket, LiftMonth> = BTreeMap::new();

    for set in view.iter().filter(|s| pattern.matches(&s.exercise_name)) {
        let entry = by_month.entry(set.month).or_insert(LiftMonth {
            month: set.month,
            max_weight: 0.0,
            max_1rm: 0.0,
        });
        entry.max_weight = entry.max_weight.max(set.weight);
        entry.max_1rm = entry.max_1rm.max(set.estimated_1rm);
    }

    let months: Vec<LiftMonth> = by_month.into_values().collect();
    let first_1rm = months.first()?.max_1rm;
    let last_1rm = months.last()?.max_1rm;
    let gain = last_1rm - first_1rm;

    Some(LiftProgression {
        lift: pattern.name.clone(),
        first_1rm,
        last_1rm,
        gain,
        gain_pct: if first_1rm > 0.0 { gain / first_1rm * 100.0 } else { 0.0 },
        months,
    })
}
