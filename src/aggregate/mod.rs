//! Aggregation engine
//!
//! Every operation is a pure reduction over a borrowed `RecordView`. Two
//! views exist over the same normalized records:
//! - raw: every set, used for volume and frequency statistics
//! - working: normal sets with weight > 0, used for PR and 1RM statistics
//!
//! A `Scope` narrows a view further (a period, a quarter, a month, ...).

mod strength;
mod volume;

pub use strength::{
    intensity, lift_progression, personal_records, BestSet, Intensity, LiftMonth, LiftProgression,
    PersonalRecord, RepRangeShare,
};
pub use volume::{
    exercise_variety, frequency_stats, imbalances, monthly_rollup, monthly_rollup_over, sessions,
    summary, top_exercises, volume_by_category, CategoryVolume, ExerciseVariety, ExerciseVolume,
    FrequencyStats, Imbalance, MonthlyRollup, Summary,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classify::Category;
use crate::model::{MonthBucket, Period, Quarter, WorkoutSet};

/// A bounded subset of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scope {
    All,
    Period { period: Period },
    /// Calendar quarter regardless of year
    Quarter { quarter: Quarter },
    Month { month: MonthBucket },
    Year { year: i32 },
    DateRange { from: NaiveDate, to: NaiveDate },
}

impl Scope {
    pub fn period(period: Period) -> Self {
        Scope::Period { period }
    }

    pub fn quarter(quarter: Quarter) -> Self {
        Scope::Quarter { quarter }
    }

    pub fn contains(&self, set: &WorkoutSet) -> bool {
        match self {
            Scope::All => true,
            Scope::Period { period } => set.period == *period,
            Scope::Quarter { quarter } => set.quarter == *quarter,
            Scope::Month { month } => set.month == *month,
            Scope::Year { year } => set.year() == *year,
            Scope::DateRange { from, to } => set.date >= *from && set.date <= *to,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all"),
            Scope::Period { period } => write!(f, "{}", period),
            Scope::Quarter { quarter } => write!(f, "{}", quarter),
            Scope::Month { month } => write!(f, "{}", month),
            Scope::Year { year } => write!(f, "{}", year),
            Scope::DateRange { from, to } => write!(f, "{}..{}", from, to),
        }
    }
}

impl std::str::FromStr for Scope {
    type Err = String;

    /// Accepts all, early, later, q1-q4, YYYY, YYYY-MM and YYYY-MM-DD..YYYY-MM-DD
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "all" => return Ok(Scope::All),
            "early" => return Ok(Scope::period(Period::Early)),
            "later" => return Ok(Scope::period(Period::Later)),
            _ => {}
        }
        if let Ok(quarter) = s.parse::<Quarter>() {
            return Ok(Scope::quarter(quarter));
        }
        if let Some((from, to)) = s.split_once("..") {
            let parse = |d: &str| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| format!("Invalid date: {}", d))
            };
            return Ok(Scope::DateRange {
                from: parse(from)?,
                to: parse(to)?,
            });
        }
        if s.len() == 4 {
            if let Ok(year) = s.parse::<i32>() {
                return Ok(Scope::Year { year });
            }
        }
        s.parse::<MonthBucket>()
            .map(|month| Scope::Month { month })
            .map_err(|_| format!("Unknown scope: {}", s))
    }
}

/// Borrowed, filtered view over normalized records
#[derive(Debug, Clone, Default)]
pub struct RecordView<'a> {
    sets: Vec<&'a WorkoutSet>,
}

impl<'a> RecordView<'a> {
    /// Every set
    pub fn raw(records: &'a [WorkoutSet]) -> Self {
        Self {
            sets: records.iter().collect(),
        }
    }

    /// Normal sets carrying weight
    pub fn working(records: &'a [WorkoutSet]) -> Self {
        Self::raw(records).working_only()
    }

    pub fn working_only(&self) -> Self {
        self.filter(|s| s.is_working())
    }

    pub fn scoped(&self, scope: &Scope) -> Self {
        match scope {
            Scope::All => self.clone(),
            _ => self.filter(|s| scope.contains(s)),
        }
    }

    pub fn filter(&self, mut predicate: impl FnMut(&WorkoutSet) -> bool) -> Self {
        Self {
            sets: self.sets.iter().copied().filter(|s| predicate(*s)).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a WorkoutSet> + '_ {
        self.sets.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn total_volume(&self) -> f64 {
        self.iter().map(|s| s.volume).sum()
    }

    /// Summed volume of the given categories
    pub fn volume_of(&self, categories: &[Category]) -> f64 {
        self.iter()
            .filter(|s| categories.contains(&s.category))
            .map(|s| s.volume)
            .sum()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.iter().map(|s| s.date).min()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.iter().map(|s| s.date).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{set, SetBuilder};

    #[test]
    fn test_views_split_working_sets() {
        let records = vec![
            set("Bench Press", "2025-03-01", 135.0, 5),
            SetBuilder::new("Bench Press", "2025-03-01").load(95.0, 10).warmup().build(),
            set("Pull Up", "2025-03-01", 0.0, 10),
        ];
        assert_eq!(RecordView::raw(&records).len(), 3);
        let working = RecordView::working(&records);
        assert_eq!(working.len(), 1);
        assert_eq!(working.total_volume(), 675.0);
    }

    #[test]
    fn test_scope_filters() {
        let records = vec![
            set("Squat", "2025-02-10", 200.0, 5),
            set("Squat", "2025-05-10", 210.0, 5),
            set("Squat", "2024-11-10", 190.0, 5),
        ];
        let view = RecordView::raw(&records);
        assert_eq!(view.scoped(&Scope::period(Period::Early)).len(), 1);
        assert_eq!(view.scoped(&Scope::period(Period::Later)).len(), 2);
        assert_eq!(view.scoped(&Scope::quarter(Quarter::Q2)).len(), 1);
        assert_eq!(view.scoped(&Scope::Year { year: 2025 }).len(), 2);
        assert_eq!(
            view.scoped(&Scope::Month {
                month: MonthBucket::new(2024, 11)
            })
            .len(),
            1
        );
    }

    #[test]
    fn test_scope_parse() {
        assert_eq!("all".parse::<Scope>(), Ok(Scope::All));
        assert_eq!("Early".parse::<Scope>(), Ok(Scope::period(Period::Early)));
        assert_eq!("q3".parse::<Scope>(), Ok(Scope::quarter(Quarter::Q3)));
        assert_eq!("2025".parse::<Scope>(), Ok(Scope::Year { year: 2025 }));
        assert_eq!(
            "2025-04".parse::<Scope>(),
            Ok(Scope::Month {
                month: MonthBucket::new(2025, 4)
            })
        );
        assert!(matches!(
            "2025-01-01..2025-03-31".parse::<Scope>(),
            Ok(Scope::DateRange { .. })
        ));
        assert!("someday".parse::<Scope>().is_err());
    }
}
