//! Test-only builders for workout sets

use chrono::{NaiveDate, NaiveDateTime};

use crate::classify::categorize;
use crate::metrics::{estimated_1rm, volume};
use crate::model::{MonthBucket, PeriodBoundary, Quarter, SetType, WorkoutSet};

/// Builder for a single set; defaults to a normal set at 18:00 lasting an hour
pub struct SetBuilder {
    exercise: String,
    title: String,
    date: NaiveDate,
    set_type: SetType,
    weight: f64,
    reps: u32,
    minutes: i64,
}

impl SetBuilder {
    pub fn new(exercise: &str, date: &str) -> Self {
        Self {
            exercise: exercise.to_string(),
            title: "Workout".to_string(),
            date: date_of(date),
            set_type: SetType::Normal,
            weight: 100.0,
            reps: 5,
            minutes: 60,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn load(mut self, weight: f64, reps: u32) -> Self {
        self.weight = weight;
        self.reps = reps;
        self
    }

    pub fn warmup(mut self) -> Self {
        self.set_type = SetType::Warmup;
        self
    }

    pub fn minutes(mut self, minutes: i64) -> Self {
        self.minutes = minutes;
        self
    }

    pub fn build(self) -> WorkoutSet {
        let start_time = at(self.date, 18, 0);
        let end_time = start_time + chrono::Duration::minutes(self.minutes);
        let month = MonthBucket::of(self.date);
        WorkoutSet {
            category: categorize(&self.exercise),
            exercise_name: self.exercise,
            set_index: 0,
            set_type: self.set_type,
            weight: self.weight,
            reps: self.reps,
            rpe: 0.0,
            distance: 0.0,
            duration_seconds: 0.0,
            notes: None,
            start_time,
            end_time,
            workout_title: self.title,
            source_id: "test.csv".to_string(),
            date: self.date,
            month,
            quarter: Quarter::of_month(month.month),
            period: PeriodBoundary::default().period_of(month.month),
            volume: volume(self.weight, self.reps),
            estimated_1rm: estimated_1rm(self.weight, self.reps),
        }
    }
}

/// Shorthand for a normal set
pub fn set(exercise: &str, date: &str, weight: f64, reps: u32) -> WorkoutSet {
    SetBuilder::new(exercise, date).load(weight, reps).build()
}

pub fn date_of(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).unwrap()
}
