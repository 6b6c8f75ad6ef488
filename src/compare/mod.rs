//! Comparative analysis: deltas, ratios and trend flags between subsets

mod periods;

pub use periods::{
    period_comparison, quarterly_progression, LiftChange, PeriodComparison, PeriodSide,
    QuarterSummary,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::aggregate::{PersonalRecord, RecordView, Scope};
use crate::classify::Category;

/// Volume change below this percentage counts as a regression
pub const REGRESSION_THRESHOLD_PCT: f64 = -20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrDelta {
    pub exercise: String,
    pub category: Category,
    pub before_1rm: f64,
    pub after_1rm: f64,
    pub delta: f64,
    pub pct: f64,
    pub before_weight: f64,
    pub after_weight: f64,
    pub weight_delta: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrComparison {
    /// Exercises with a nonzero 1RM on both sides, largest pct first
    pub compared: Vec<PrDelta>,
    pub only_in_a: Vec<String>,
    pub only_in_b: Vec<String>,
    /// Trained on both sides, but with no rated set (1RM of 0) on at least one
    pub unrated: Vec<String>,
    pub improved_count: usize,
    pub stagnant_count: usize,
    /// 0 when nothing is comparable
    pub avg_pct: f64,
}

/// Compare two sets of personal records exercise by exercise
pub fn pr_comparison(a: &[PersonalRecord], b: &[PersonalRecord]) -> PrComparison {
    let index = |records: &[PersonalRecord]| -> BTreeMap<String, PersonalRecord> {
        records
            .iter()
            .map(|r| (r.exercise.clone(), r.clone()))
            .collect()
    };
    let before = index(a);
    let after = index(b);

    let mut compared: Vec<PrDelta> = vec![];
    let mut only_in_a = vec![];
    let mut unrated = vec![];
    for (exercise, old) in &before {
        let Some(new) = after.get(exercise) else {
            only_in_a.push(exercise.clone());
            continue;
        };
        if old.max_1rm <= 0.0 || new.max_1rm <= 0.0 {
            unrated.push(exercise.clone());
            continue;
        }
        let delta = new.max_1rm - old.max_1rm;
        compared.push(PrDelta {
            exercise: exercise.clone(),
            category: old.category,
            before_1rm: old.max_1rm,
            after_1rm: new.max_1rm,
            delta,
            pct: delta / old.max_1rm * 100.0,
            before_weight: old.max_weight,
            after_weight: new.max_weight,
            weight_delta: new.max_weight - old.max_weight,
        });
    }
    compared.sort_by(|x, y| {
        y.pct
            .total_cmp(&x.pct)
            .then_with(|| x.exercise.cmp(&y.exercise))
    });

    let only_in_b = after
        .keys()
        .filter(|name| !before.contains_key(*name))
        .cloned()
        .collect();

    let improved_count = compared.iter().filter(|d| d.delta > 0.0).count();
    let avg_pct = if compared.is_empty() {
        0.0
    } else {
        compared.iter().map(|d| d.pct).sum::<f64>() / compared.len() as f64
    };

    PrComparison {
        improved_count,
        stagnant_count: compared.len() - improved_count,
        avg_pct,
        compared,
        only_in_a,
        only_in_b,
        unrated,
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushPullBalance {
    pub push_volume: f64,
    pub pull_volume: f64,
    /// push / pull; 0 when there is no pull volume
    pub ratio: f64,
}

/// Push (Chest + Shoulders) against pull (Back)
pub fn balance_ratios(view: &RecordView, scope: &Scope) -> PushPullBalance {
    let scoped = view.scoped(scope);
    let push_volume = scoped.volume_of(&Category::PUSH);
    let pull_volume = scoped.volume_of(&Category::PULL);
    PushPullBalance {
        push_volume,
        pull_volume,
        ratio: ratio(push_volume, pull_volume),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpperLowerBalance {
    pub upper_volume: f64,
    pub lower_volume: f64,
    /// upper / lower; 0 when there is no lower volume
    pub ratio: f64,
}

/// Upper body (Chest + Back + Shoulders + Arms) against Legs
pub fn upper_lower_ratio(view: &RecordView, scope: &Scope) -> UpperLowerBalance {
    let scoped = view.scoped(scope);
    let upper_volume = scoped.volume_of(&Category::UPPER);
    let lower_volume = scoped.volume_of(&Category::LOWER);
    UpperLowerBalance {
        upper_volume,
        lower_volume,
        ratio: ratio(upper_volume, lower_volume),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Growth,
    Decline,
    Regression,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Growth => "growth",
            Trend::Decline => "decline",
            Trend::Regression => "regression",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendFlag {
    pub current: f64,
    pub prior: f64,
    pub pct_change: f64,
    pub trend: Trend,
}

/// Classify the change from `prior` to `current`.
///
/// A zero prior has no meaningful percentage and is reported as growth
/// with a 0% change.
pub fn regression_flag(current: f64, prior: f64) -> TrendFlag {
    if prior == 0.0 {
        return TrendFlag {
            current,
            prior,
            pct_change: 0.0,
            trend: Trend::Growth,
        };
    }

    let pct_change = (current - prior) / prior * 100.0;
    let trend = if pct_change < REGRESSION_THRESHOLD_PCT {
        Trend::Regression
    } else if pct_change < 0.0 {
        Trend::Decline
    } else {
        Trend::Growth
    };

    TrendFlag {
        current,
        prior,
        pct_change,
        trend,
    }
}
