//! Typed records produced by ingestion
//!
//! A `WorkoutSet` is built once at the ingestion boundary with every derived
//! field populated. Downstream code only ever borrows it.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classify::Category;
use crate::error::IngestError;

/// Kind of logged set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    Warmup,
    Normal,
    /// failure, dropset and anything else the export invents
    Other,
}

impl SetType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "warmup" | "warm_up" | "warm-up" => SetType::Warmup,
            "normal" => SetType::Normal,
            _ => SetType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SetType::Warmup => "warmup",
            SetType::Normal => "normal",
            SetType::Other => "other",
        }
    }
}

/// Calendar month bucket, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
}

impl MonthBucket {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Every month from `self` to `last`, both inclusive
    pub fn through(self, last: MonthBucket) -> Vec<MonthBucket> {
        let mut months = vec![];
        let mut current = self;
        while current <= last {
            months.push(current);
            current = current.next();
        }
        months
    }

    pub fn quarter(&self) -> Quarter {
        Quarter::of_month(self.month)
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for MonthBucket {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Expected YYYY-MM, got: {}", s))?;
        let year: i32 = year.parse().map_err(|_| format!("Invalid year: {}", year))?;
        let month: u32 = month.parse().map_err(|_| format!("Invalid month: {}", month))?;
        if !(1..=12).contains(&month) {
            return Err(format!("Month out of range: {}", month));
        }
        Ok(Self::new(year, month))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    pub fn of_month(month: u32) -> Self {
        match month {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Quarter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            _ => Err(format!("Unknown quarter: {}", s)),
        }
    }
}

/// Two-way split of the year around `PeriodBoundary`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Early,
    Later,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Early => "early",
            Period::Later => "later",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Last month (inclusive) that still counts as `Period::Early`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBoundary {
    last_early_month: u32,
}

impl PeriodBoundary {
    pub fn new(last_early_month: u32) -> Result<Self, IngestError> {
        if !(1..=12).contains(&last_early_month) {
            return Err(IngestError::InvalidPeriodBoundary(last_early_month));
        }
        Ok(Self { last_early_month })
    }

    pub fn last_early_month(&self) -> u32 {
        self.last_early_month
    }

    pub fn period_of(&self, month: u32) -> Period {
        if month <= self.last_early_month {
            Period::Early
        } else {
            Period::Later
        }
    }
}

impl Default for PeriodBoundary {
    /// Jan-Mar early, Apr-Dec later
    fn default() -> Self {
        Self { last_early_month: 3 }
    }
}

/// One logged set with every derived field populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub exercise_name: String,
    pub set_index: u32,
    pub set_type: SetType,
    pub weight: f64,
    pub reps: u32,
    /// 0 when the export left it empty
    pub rpe: f64,
    pub distance: f64,
    pub duration_seconds: f64,
    pub notes: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub workout_title: String,
    pub source_id: String,

    pub date: NaiveDate,
    pub month: MonthBucket,
    pub quarter: Quarter,
    pub period: Period,
    pub category: Category,
    pub volume: f64,
    pub estimated_1rm: f64,
}

impl WorkoutSet {
    /// Working sets feed strength statistics: normal sets with load on the bar
    pub fn is_working(&self) -> bool {
        self.set_type == SetType::Normal && self.weight > 0.0
    }

    pub fn year(&self) -> i32 {
        self.month.year
    }

    /// Composite key identifying the owning session
    pub fn session_key(&self) -> (&str, NaiveDate) {
        (self.workout_title.as_str(), self.date)
    }
}

/// One training session: the sets sharing (title, date)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub set_count: usize,
    pub total_volume: f64,
}

impl Workout {
    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration().num_seconds() as f64 / 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_of_month() {
        assert_eq!(Quarter::of_month(1), Quarter::Q1);
        assert_eq!(Quarter::of_month(3), Quarter::Q1);
        assert_eq!(Quarter::of_month(4), Quarter::Q2);
        assert_eq!(Quarter::of_month(9), Quarter::Q3);
        assert_eq!(Quarter::of_month(10), Quarter::Q4);
        assert_eq!(Quarter::of_month(12), Quarter::Q4);
    }

    #[test]
    fn test_period_boundary() {
        let boundary = PeriodBoundary::default();
        assert_eq!(boundary.period_of(3), Period::Early);
        assert_eq!(boundary.period_of(4), Period::Later);

        let june = PeriodBoundary::new(5).unwrap();
        assert_eq!(june.period_of(5), Period::Early);
        assert_eq!(june.period_of(6), Period::Later);

        assert!(PeriodBoundary::new(0).is_err());
        assert!(PeriodBoundary::new(13).is_err());
    }

    #[test]
    fn test_month_bucket_range_crosses_year() {
        let months = MonthBucket::new(2024, 11).through(MonthBucket::new(2025, 2));
        let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
        assert_eq!(labels, vec!["2024-11", "2024-12", "2025-01", "2025-02"]);
        assert!(MonthBucket::new(2025, 3)
            .through(MonthBucket::new(2025, 1))
            .is_empty());
    }

    #[test]
    fn test_month_bucket_parse() {
        let month: MonthBucket = "2025-07".parse().unwrap();
        assert_eq!(month, MonthBucket::new(2025, 7));
        assert_eq!(month.quarter(), Quarter::Q3);
        assert!("2025-13".parse::<MonthBucket>().is_err());
        assert!("2025".parse::<MonthBucket>().is_err());
    }

    #[test]
    fn test_set_type_parse() {
        assert_eq!(SetType::parse("warmup"), SetType::Warmup);
        assert_eq!(SetType::parse(" Normal "), SetType::Normal);
        assert_eq!(SetType::parse("failure"), SetType::Other);
        assert_eq!(SetType::parse("dropset"), SetType::Other);
    }
}
