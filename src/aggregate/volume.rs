//! Volume, frequency and session statistics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{RecordView, Scope};
use crate::classify::Category;
use crate::model::{MonthBucket, Workout};

/// Group sets into sessions keyed by (title, date), in one pass
pub fn sessions(view: &RecordView) -> Vec<Workout> {
    let mut by_key: BTreeMap<(NaiveDate, &str), Workout> = BTreeMap::new();

    for set in view.iter() {
        let key = (set.date, set.workout_title.as_str());
        let workout = by_key.entry(key).or_insert_with(|| Workout {
            title: set.workout_title.clone(),
            date: set.date,
            start_time: set.start_time,
            end_time: set.end_time,
            set_count: 0,
            total_volume: 0.0,
        });
        workout.start_time = workout.start_time.min(set.start_time);
        workout.end_time = workout.end_time.max(set.end_time);
        workout.set_count += 1;
        workout.total_volume += set.volume;
    }

    by_key.into_values().collect()
}

fn distinct_sessions(view: &RecordView) -> usize {
    view.iter()
        .map(|s| s.session_key())
        .collect::<BTreeSet<_>>()
        .len()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryVolume {
    pub category: Category,
    pub volume: f64,
    pub sets: usize,
    /// Share of the scope's total volume; 0 when that total is 0
    pub percentage: f64,
}

/// Volume per represented category, largest first
pub fn volume_by_category(view: &RecordView, scope: &Scope) -> Vec<CategoryVolume> {
    let scoped = view.scoped(scope);
    let total = scoped.total_volume();

    let mut by_category: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
    for set in scoped.iter() {
        let entry = by_category.entry(set.category).or_insert((0.0, 0));
        entry.0 += set.volume;
        entry.1 += 1;
    }

    let mut rows: Vec<CategoryVolume> = by_category
        .into_iter()
        .map(|(category, (volume, sets))| CategoryVolume {
            category,
            volume,
            sets,
            percentage: if total > 0.0 { volume / total * 100.0 } else { 0.0 },
        })
        .collect();
    rows.sort_by(|a, b| {
        b.volume
            .total_cmp(&a.volume)
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyStats {
    pub sessions: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub date_span_days: i64,
    /// 0 when all sessions fall on one day
    pub sessions_per_week: f64,
}

pub fn frequency_stats(view: &RecordView, scope: &Scope) -> FrequencyStats {
    let scoped = view.scoped(scope);
    let sessions = distinct_sessions(&scoped);
    let first_date = scoped.first_date();
    let last_date = scoped.last_date();
    let date_span_days = match (first_date, last_date) {
        (Some(first), Some(last)) => (last - first).num_days(),
        _ => 0,
    };
    let sessions_per_week = if date_span_days > 0 {
        sessions as f64 / (date_span_days as f64 / 7.0)
    } else {
        0.0
    };

    FrequencyStats {
        sessions,
        first_date,
        last_date,
        date_span_days,
        sessions_per_week,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRollup {
    pub month: MonthBucket,
    pub total_volume: f64,
    pub distinct_workouts: usize,
    pub total_sets: usize,
    /// 0 when the month has no workouts
    pub avg_volume_per_workout: f64,
    pub duration_minutes: f64,
}

impl MonthlyRollup {
    fn empty(month: MonthBucket) -> Self {
        Self {
            month,
            total_volume: 0.0,
            distinct_workouts: 0,
            total_sets: 0,
            avg_volume_per_workout: 0.0,
            duration_minutes: 0.0,
        }
    }
}

/// One entry per month from the view's first to last month, gaps zero-filled
pub fn monthly_rollup(view: &RecordView) -> Vec<MonthlyRollup> {
    let first = view.iter().map(|s| s.month).min();
    let last = view.iter().map(|s| s.month).max();
    match (first, last) {
        (Some(first), Some(last)) => monthly_rollup_over(view, &first.through(last)),
        _ => vec![],
    }
}

/// One entry per requested month, zero-filled where the view has nothing
pub fn monthly_rollup_over(view: &RecordView, months: &[MonthBucket]) -> Vec<MonthlyRollup> {
    let mut by_month: HashMap<MonthBucket, MonthlyRollup> = HashMap::new();
    for workout in sessions(view) {
        let month = MonthBucket::of(workout.date);
        let rollup = by_month
            .entry(month)
            .or_insert_with(|| MonthlyRollup::empty(month));
        rollup.total_volume += workout.total_volume;
        rollup.total_sets += workout.set_count;
        rollup.distinct_workouts += 1;
        rollup.duration_minutes += workout.duration_minutes();
    }

    months
        .iter()
        .map(|month| {
            let mut rollup = by_month
                .remove(month)
                .unwrap_or_else(|| MonthlyRollup::empty(*month));
            if rollup.distinct_workouts > 0 {
                rollup.avg_volume_per_workout =
                    rollup.total_volume / rollup.distinct_workouts as f64;
            }
            rollup
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseVolume {
    pub exercise: String,
    pub volume: f64,
    pub sets: usize,
}

/// Highest-volume exercises, at most `limit`
pub fn top_exercises(view: &RecordView, limit: usize) -> Vec<ExerciseVolume> {
    let mut by_exercise: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for set in view.iter() {
        let entry = by_exercise.entry(set.exercise_name.as_str()).or_insert((0.0, 0));
        entry.0 += set.volume;
        entry.1 += 1;
    }

    let mut rows: Vec<ExerciseVolume> = by_exercise
        .into_iter()
        .map(|(exercise, (volume, sets))| ExerciseVolume {
            exercise: exercise.to_string(),
            volume,
            sets,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.volume
            .total_cmp(&a.volume)
            .then_with(|| a.exercise.cmp(&b.exercise))
    });
    rows.truncate(limit);
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imbalance {
    pub category: Category,
    pub percentage: f64,
}

/// Major muscle groups whose share of volume sits below `threshold_pct`.
/// A major group with no volume at all counts as 0%.
pub fn imbalances(category_volume: &[CategoryVolume], threshold_pct: f64) -> Vec<Imbalance> {
    let total: f64 = category_volume.iter().map(|c| c.volume).sum();
    if total <= 0.0 {
        return vec![];
    }

    Category::MAJOR
        .iter()
        .filter_map(|category| {
            let percentage = category_volume
                .iter()
                .find(|c| c.category == *category)
                .map_or(0.0, |c| c.percentage);
            (percentage < threshold_pct).then_some(Imbalance {
                category: *category,
                percentage,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseVariety {
    pub before: usize,
    pub after: usize,
    /// In `after` but not `before`
    pub added: Vec<String>,
    /// In `before` but not `after`
    pub dropped: Vec<String>,
    pub common: Vec<String>,
}

pub fn exercise_variety(before: &RecordView, after: &RecordView) -> ExerciseVariety {
    fn names(view: &RecordView) -> BTreeSet<String> {
        view.iter().map(|s| s.exercise_name.clone()).collect()
    }
    let before_names = names(before);
    let after_names = names(after);

    ExerciseVariety {
        before: before_names.len(),
        after: after_names.len(),
        added: after_names.difference(&before_names).cloned().collect(),
        dropped: before_names.difference(&after_names).cloned().collect(),
        common: before_names.intersection(&after_names).cloned().collect(),
    }
}

/// Headline numbers for a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_sets: usize,
    pub total_workouts: usize,
    pub total_volume: f64,
    pub unique_exercises: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub date_span_days: i64,
    pub avg_workouts_per_week: f64,
    pub sources: Vec<String>,
}

pub fn summary(view: &RecordView) -> Summary {
    let frequency = frequency_stats(view, &Scope::All);
    let unique_exercises = view
        .iter()
        .map(|s| s.exercise_name.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    let sources = view
        .iter()
        .map(|s| s.source_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    Summary {
        total_sets: view.len(),
        total_workouts: frequency.sessions,
        total_volume: view.total_volume(),
        unique_exercises,
        first_date: frequency.first_date,
        last_date: frequency.last_date,
        date_span_days: frequency.date_span_days,
        avg_workouts_per_week: frequency.sessions_per_week,
        sources,
    }
}
