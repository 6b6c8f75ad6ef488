//! Side-by-side period and quarter comparisons

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{regression_flag, TrendFlag};
use crate::aggregate::{
    exercise_variety, frequency_stats, intensity, sessions, top_exercises, ExerciseVariety,
    ExerciseVolume, Intensity, RecordView, Scope,
};
use crate::classify::LiftPattern;
use crate::model::Quarter;

/// Training load of one side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSide {
    pub total_volume: f64,
    pub total_sets: usize,
    pub workouts: usize,
    pub workouts_per_week: f64,
    pub avg_volume_per_workout: f64,
    pub avg_duration_minutes: f64,
    /// Computed over working sets only
    pub intensity: Intensity,
}

impl PeriodSide {
    fn of(view: &RecordView) -> Self {
        let workouts = sessions(view);
        let total_volume = view.total_volume();
        let (avg_volume_per_workout, avg_duration_minutes) = if workouts.is_empty() {
            (0.0, 0.0)
        } else {
            let n = workouts.len() as f64;
            let minutes: f64 = workouts.iter().map(|w| w.duration_minutes()).sum();
            (total_volume / n, minutes / n)
        };

        Self {
            total_volume,
            total_sets: view.len(),
            workouts: workouts.len(),
            workouts_per_week: frequency_stats(view, &Scope::All).sessions_per_week,
            avg_volume_per_workout,
            avg_duration_minutes,
            intensity: intensity(&view.working_only()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub before: PeriodSide,
    pub after: PeriodSide,
    pub volume_change: TrendFlag,
    pub variety: ExerciseVariety,
}

/// Compare two raw views, `before` first
pub fn period_comparison(before: &RecordView, after: &RecordView) -> PeriodComparison {
    let before_side = PeriodSide::of(before);
    let after_side = PeriodSide::of(after);
    PeriodComparison {
        volume_change: regression_flag(after_side.total_volume, before_side.total_volume),
        variety: exercise_variety(before, after),
        before: before_side,
        after: after_side,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftMax {
    pub lift: String,
    /// `None` when the lift was not performed
    pub max_1rm: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftChange {
    pub lift: String,
    pub prior_1rm: Option<f64>,
    pub current_1rm: Option<f64>,
    /// Only when the lift appears in both quarters
    pub change: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterSummary {
    pub year: i32,
    pub quarter: Quarter,
    pub total_volume: f64,
    pub workouts: usize,
    pub total_sets: usize,
    pub avg_volume_per_workout: f64,
    pub top_exercises: Vec<ExerciseVolume>,
    pub lift_maxes: Vec<LiftMax>,
    /// Against the previous quarter present in the data
    pub volume_trend: Option<TrendFlag>,
    pub lift_changes: Vec<LiftChange>,
}

fn max_1rm(working: &RecordView, pattern: &LiftPattern) -> Option<f64> {
    working
        .iter()
        .filter(|s| pattern.matches(&s.exercise_name))
        .map(|s| s.estimated_1rm)
        .max_by(|a, b| a.total_cmp(b))
}

/// Quarter-over-quarter progression for every (year, quarter) present in `view`
pub fn quarterly_progression(
    view: &RecordView,
    lifts: &[LiftPattern],
    top_n: usize,
) -> Vec<QuarterSummary> {
    let present: BTreeSet<(i32, Quarter)> = view.iter().map(|s| (s.year(), s.quarter)).collect();

    let mut summaries: Vec<QuarterSummary> = Vec::with_capacity(present.len());
    for (year, quarter) in present {
        let raw = view.filter(|s| s.year() == year && s.quarter == quarter);
        let working = raw.working_only();
        let workouts = sessions(&raw).len();
        let total_volume = raw.total_volume();

        let lift_maxes: Vec<LiftMax> = lifts
            .iter()
            .map(|pattern| LiftMax {
                lift: pattern.name.clone(),
                max_1rm: max_1rm(&working, pattern),
            })
            .collect();

        let (volume_trend, lift_changes) = match summaries.last() {
            Some(prior) => (
                Some(regression_flag(total_volume, prior.total_volume)),
                lift_maxes
                    .iter()
                    .zip(&prior.lift_maxes)
                    .map(|(current, previous)| LiftChange {
                        lift: current.lift.clone(),
                        prior_1rm: previous.max_1rm,
                        current_1rm: current.max_1rm,
                        change: current.max_1rm.zip(previous.max_1rm).map(|(c, p)| c - p),
                    })
                    .collect(),
            ),
            None => (None, vec![]),
        };

        summaries.push(QuarterSummary {
            year,
            quarter,
            total_volume,
            workouts,
            total_sets: raw.len(),
            avg_volume_per_workout: if workouts > 0 {
                total_volume / workouts as f64
            } else {
                0.0
            },
            top_exercises: top_exercises(&raw, top_n),
            lift_maxes,
            volume_trend,
            lift_changes,
        });
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Trend;
    use crate::model::WorkoutSet;
    use crate::test_utils::{date_of, set, SetBuilder};

    fn year() -> Vec<WorkoutSet> {
        vec![
            SetBuilder::new("Bench Press (Barbell)", "2025-01-06").title("Push").load(135.0, 5).minutes(60).build(),
            SetBuilder::new("Squat (Barbell)", "2025-01-08").title("Legs").load(225.0, 5).minutes(90).build(),
            SetBuilder::new("Bench Press (Barbell)", "2025-04-07").title("Push").load(155.0, 5).build(),
            SetBuilder::new("Bench Press (Barbell)", "2025-04-07").title("Push").load(95.0, 10).warmup().build(),
            set("Lateral Raise", "2025-08-01", 20.0, 15),
        ]
    }

    #[test]
    fn test_period_comparison() {
        let records = year();
        let view = RecordView::raw(&records);
        let cutoff = date_of("2025-04-01");
        let comparison = period_comparison(
            &view.filter(|s| s.date < cutoff),
            &view.filter(|s| s.date >= cutoff),
        );

        assert_eq!(comparison.before.workouts, 2);
        assert_eq!(comparison.before.total_volume, 675.0 + 1125.0);
        assert_eq!(comparison.before.avg_duration_minutes, 75.0);
        assert_eq!(comparison.after.total_sets, 3);
        // Warmup counts toward volume but not intensity
        assert_eq!(comparison.after.intensity.sets, 2);
        assert_eq!(comparison.after.total_volume, 775.0 + 950.0 + 300.0);
        assert_eq!(comparison.volume_change.trend, Trend::Growth);
        assert_eq!(comparison.variety.added, vec!["Lateral Raise".to_string()]);
        assert_eq!(comparison.variety.dropped, vec!["Squat (Barbell)".to_string()]);
    }

    #[test]
    fn test_period_comparison_with_empty_side() {
        let records = year();
        let view = RecordView::raw(&records);
        let empty: Vec<WorkoutSet> = vec![];
        let comparison = period_comparison(&RecordView::raw(&empty), &view);
        assert_eq!(comparison.before.workouts, 0);
        assert_eq!(comparison.before.avg_volume_per_workout, 0.0);
        assert_eq!(comparison.volume_change.trend, Trend::Growth);
        assert_eq!(comparison.volume_change.pct_change, 0.0);
    }

    #[test]
    fn test_quarterly_progression() {
        let records = year();
        let quarters =
            quarterly_progression(&RecordView::raw(&records), &LiftPattern::big_three(), 3);

        let labels: Vec<Quarter> = quarters.iter().map(|q| q.quarter).collect();
        assert_eq!(labels, vec![Quarter::Q1, Quarter::Q2, Quarter::Q3]);

        let q1 = &quarters[0];
        assert_eq!(q1.workouts, 2);
        assert!(q1.volume_trend.is_none());
        assert!(q1.lift_changes.is_empty());
        assert_eq!(q1.lift_maxes[2].max_1rm, None);

        let q2 = &quarters[1];
        let bench = &q2.lift_changes[0];
        assert_eq!(bench.lift, "Bench Press");
        assert!((bench.change.unwrap() - 22.50).abs() < 0.01);
        let squat = &q2.lift_changes[1];
        assert!(squat.prior_1rm.is_some());
        assert_eq!(squat.current_1rm, None);
        assert_eq!(squat.change, None);
        // 1725 against 1800
        assert_eq!(q2.volume_trend.unwrap().trend, Trend::Decline);

        let q3 = &quarters[2];
        assert_eq!(q3.volume_trend.unwrap().trend, Trend::Regression);
        assert_eq!(q3.top_exercises[0].exercise, "Lateral Raise");
    }

    #[test]
    fn test_quarters_of_different_years_stay_apart() {
        let records = vec![
            set("Squat", "2024-02-01", 200.0, 5),
            set("Squat", "2025-02-01", 220.0, 5),
        ];
        let quarters = quarterly_progression(&RecordView::raw(&records), &[], 5);
        assert_eq!(quarters.len(), 2);
        assert_eq!(quarters[0].year, 2024);
        assert_eq!(quarters[1].year, 2025);
    }
}
