//! Ingestion and normalization
//!
//! Raw tables from any source are validated once here and turned into
//! `WorkoutSet` values with every derived field populated. A malformed
//! timestamp, a malformed number or a missing required column aborts the
//! whole batch; nothing partial is returned.

mod columns;

pub use columns::{ColumnMap, Field};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

use crate::classify::categorize;
use crate::error::IngestError;
use crate::metrics::{estimated_1rm, volume};
use crate::model::{MonthBucket, PeriodBoundary, Quarter, SetType, WorkoutSet};

/// Timestamp layout of Hevy CSV exports, e.g. "8 Mar 2025, 17:05"
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d %b %Y, %H:%M";

/// One untyped table as handed over by a source
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub source_id: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(source_id: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            source_id: source_id.into(),
            headers,
            rows,
        }
    }
}

/// Optional date window applied after bucket derivation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateFilter {
    pub year: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateFilter {
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.year.map_or(true, |y| date.year() == y)
            && self.from.map_or(true, |from| date >= from)
            && self.to.map_or(true, |to| date <= to)
    }
}

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub timestamp_format: String,
    pub boundary: PeriodBoundary,
    pub filter: DateFilter,
    /// Collapse rows repeated across overlapping exports
    pub deduplicate: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            boundary: PeriodBoundary::default(),
            filter: DateFilter::default(),
            deduplicate: true,
        }
    }
}

/// Normalize every table into one ordered record sequence
pub fn normalize(tables: &[RawTable], options: &IngestOptions) -> Result<Vec<WorkoutSet>, IngestError> {
    let mut sets = vec![];

    for table in tables {
        let columns = ColumnMap::resolve(&table.source_id, &table.headers)?;
        for (idx, row) in table.rows.iter().enumerate() {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let parser = RowParser {
                source_id: &table.source_id,
                row_number: idx + 1,
                columns: &columns,
                row,
            };
            sets.push(parser.parse(options)?);
        }
        debug!(source = %table.source_id, rows = table.rows.len(), "normalized table");
    }

    let parsed = sets.len();
    if !options.filter.is_empty() {
        sets.retain(|s| options.filter.contains(s.date));
    }
    sets.sort_by(compare_sets);

    if options.deduplicate {
        let mut seen = HashSet::new();
        sets.retain(|s| seen.insert(fingerprint(s)));
    }

    debug!(parsed, kept = sets.len(), "ingestion complete");
    Ok(sets)
}

struct RowParser<'a> {
    source_id: &'a str,
    row_number: usize,
    columns: &'a ColumnMap,
    row: &'a [String],
}

impl RowParser<'_> {
    fn parse(&self, options: &IngestOptions) -> Result<WorkoutSet, IngestError> {
        let start_time = self.timestamp(Field::StartTime, &options.timestamp_format)?;
        let end_time = self.timestamp(Field::EndTime, &options.timestamp_format)?;
        let weight = self.number(Field::Weight)?;
        let reps = self.count(Field::Reps)?;
        let exercise_name = self.text(Field::ExerciseName).to_string();

        let date = start_time.date();
        let month = MonthBucket::of(date);
        let notes = Some(self.text(Field::Notes))
            .filter(|n| !n.is_empty())
            .map(String::from);

        Ok(WorkoutSet {
            category: categorize(&exercise_name),
            exercise_name,
            set_index: self.count(Field::SetIndex)?,
            set_type: SetType::parse(self.text(Field::SetType)),
            weight,
            reps,
            rpe: self.number(Field::Rpe)?,
            distance: self.number(Field::Distance)?,
            duration_seconds: self.number(Field::Duration)?,
            notes,
            start_time,
            end_time,
            workout_title: self.text(Field::WorkoutTitle).to_string(),
            source_id: self.source_id.to_string(),
            date,
            month,
            quarter: Quarter::of_month(month.month),
            period: options.boundary.period_of(month.month),
            volume: volume(weight, reps),
            estimated_1rm: estimated_1rm(weight, reps),
        })
    }

    fn text(&self, field: Field) -> &str {
        self.columns.cell(self.row, field)
    }

    fn timestamp(&self, field: Field, format: &str) -> Result<NaiveDateTime, IngestError> {
        let value = self.text(field);
        NaiveDateTime::parse_from_str(value, format).map_err(|_| IngestError::MalformedTimestamp {
            source_id: self.source_id.to_string(),
            row: self.row_number,
            column: field.name().to_string(),
            value: value.to_string(),
        })
    }

    /// Non-negative number; empty cells count as 0
    fn number(&self, field: Field) -> Result<f64, IngestError> {
        let value = self.text(field);
        if value.is_empty() || value.eq_ignore_ascii_case("nan") {
            return Ok(0.0);
        }
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(n),
            _ => Err(self.malformed_number(field, value)),
        }
    }

    /// Non-negative integer; tolerates "5.0" as written by spreadsheet tools
    fn count(&self, field: Field) -> Result<u32, IngestError> {
        let n = self.number(field)?;
        if n.fract() != 0.0 || n > u32::MAX as f64 {
            return Err(self.malformed_number(field, self.text(field)));
        }
        Ok(n as u32)
    }

    fn malformed_number(&self, field: Field, value: &str) -> IngestError {
        IngestError::MalformedNumber {
            source_id: self.source_id.to_string(),
            row: self.row_number,
            column: field.name().to_string(),
            value: value.to_string(),
        }
    }
}

/// Total order over sets; only `source_id` breaks ties between duplicates
fn compare_sets(a: &WorkoutSet, b: &WorkoutSet) -> Ordering {
    a.start_time
        .cmp(&b.start_time)
        .then_with(|| a.end_time.cmp(&b.end_time))
        .then_with(|| a.workout_title.cmp(&b.workout_title))
        .then_with(|| a.exercise_name.cmp(&b.exercise_name))
        .then_with(|| a.set_index.cmp(&b.set_index))
        .then_with(|| a.set_type.cmp(&b.set_type))
        .then_with(|| a.weight.total_cmp(&b.weight))
        .then_with(|| a.reps.cmp(&b.reps))
        .then_with(|| a.rpe.total_cmp(&b.rpe))
        .then_with(|| a.distance.total_cmp(&b.distance))
        .then_with(|| a.duration_seconds.total_cmp(&b.duration_seconds))
        .then_with(|| a.notes.cmp(&b.notes))
        .then_with(|| a.source_id.cmp(&b.source_id))
}

/// Content hash of a set, ignoring which source it came from
fn fingerprint(set: &WorkoutSet) -> String {
    let mut hasher = Sha256::new();
    let fields = [
        set.start_time.to_string(),
        set.end_time.to_string(),
        set.workout_title.clone(),
        set.exercise_name.clone(),
        set.set_index.to_string(),
        set.set_type.as_str().to_string(),
        set.weight.to_string(),
        set.reps.to_string(),
        set.rpe.to_string(),
        set.distance.to_string(),
        set.duration_seconds.to_string(),
        set.notes.clone().unwrap_or_default(),
    ];
    for field in &fields {
        hasher.update(field.as_bytes());
        hasher.update([0x1f]);
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;
    use crate::model::Period;

    const HEADERS: [&str; 11] = [
        "title",
        "start_time",
        "end_time",
        "exercise_title",
        "set_index",
        "set_type",
        "weight_lbs",
        "reps",
        "distance_miles",
        "duration_seconds",
        "rpe",
    ];

    fn table(source_id: &str, rows: &[[&str; 11]]) -> RawTable {
        RawTable::new(
            source_id,
            HEADERS.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    const BENCH: [&str; 11] = [
        "Push Day",
        "8 Mar 2025, 17:05",
        "8 Mar 2025, 18:10",
        "Bench Press (Barbell)",
        "0",
        "normal",
        "135",
        "5",
        "",
        "",
        "8",
    ];

    const SQUAT: [&str; 11] = [
        "Leg Day",
        "12 Jun 2025, 07:30",
        "12 Jun 2025, 08:45",
        "Squat (Barbell)",
        "1",
        "warmup",
        "95",
        "10",
        "",
        "",
        "",
    ];

    #[test]
    fn test_normalize_derives_fields() {
        let sets = normalize(&[table("march.csv", &[BENCH])], &IngestOptions::default()).unwrap();
        assert_eq!(sets.len(), 1);
        let set = &sets[0];
        assert_eq!(set.exercise_name, "Bench Press (Barbell)");
        assert_eq!(set.workout_title, "Push Day");
        assert_eq!(set.set_type, SetType::Normal);
        assert_eq!(set.date, NaiveDate::from_ymd_opt(2025, 3, 8).unwrap());
        assert_eq!(set.month, MonthBucket::new(2025, 3));
        assert_eq!(set.quarter, Quarter::Q1);
        assert_eq!(set.period, Period::Early);
        assert_eq!(set.category, Category::Chest);
        assert_eq!(set.volume, 675.0);
        assert!((set.estimated_1rm - 151.89).abs() < 0.01);
        assert_eq!(set.rpe, 8.0);
        assert_eq!(set.source_id, "march.csv");
    }

    #[test]
    fn test_missing_numbers_default_to_zero() {
        let mut row = SQUAT;
        row[6] = "";
        row[7] = "";
        let sets = normalize(&[table("a.csv", &[row])], &IngestOptions::default()).unwrap();
        assert_eq!(sets[0].weight, 0.0);
        assert_eq!(sets[0].reps, 0);
        assert_eq!(sets[0].rpe, 0.0);
        assert_eq!(sets[0].distance, 0.0);
        assert_eq!(sets[0].volume, 0.0);
        assert_eq!(sets[0].estimated_1rm, 0.0);
    }

    #[test]
    fn test_malformed_timestamp_aborts_batch() {
        let mut bad = SQUAT;
        bad[1] = "2025-06-12 07:30";
        let err = normalize(
            &[table("good.csv", &[BENCH]), table("bad.csv", &[SQUAT, bad])],
            &IngestOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            IngestError::MalformedTimestamp {
                source_id: "bad.csv".to_string(),
                row: 2,
                column: "start_time".to_string(),
                value: "2025-06-12 07:30".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_number_is_fatal() {
        let mut bad = BENCH;
        bad[7] = "five";
        assert!(matches!(
            normalize(&[table("a.csv", &[bad])], &IngestOptions::default()),
            Err(IngestError::MalformedNumber { .. })
        ));

        let mut negative = BENCH;
        negative[6] = "-10";
        assert!(normalize(&[table("a.csv", &[negative])], &IngestOptions::default()).is_err());

        let mut fractional_reps = BENCH;
        fractional_reps[7] = "5.5";
        assert!(normalize(&[table("a.csv", &[fractional_reps])], &IngestOptions::default()).is_err());

        let mut integral_float = BENCH;
        integral_float[7] = "5.0";
        let sets = normalize(&[table("a.csv", &[integral_float])], &IngestOptions::default()).unwrap();
        assert_eq!(sets[0].reps, 5);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let broken = RawTable::new(
            "broken.csv",
            vec!["title".to_string(), "start_time".to_string()],
            vec![],
        );
        assert!(matches!(
            normalize(&[broken], &IngestOptions::default()),
            Err(IngestError::MissingRequiredColumn { .. })
        ));
    }

    #[test]
    fn test_output_independent_of_source_order() {
        let options = IngestOptions {
            deduplicate: false,
            ..IngestOptions::default()
        };
        let forward = normalize(&[table("a.csv", &[BENCH, SQUAT]), table("b.csv", &[SQUAT])], &options).unwrap();
        let backward = normalize(&[table("b.csv", &[SQUAT]), table("a.csv", &[SQUAT, BENCH])], &options).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 3);
        assert_eq!(forward[0].exercise_name, "Bench Press (Barbell)");
    }

    #[test]
    fn test_deduplicate_overlapping_exports() {
        let sets = normalize(
            &[table("june.csv", &[BENCH, SQUAT]), table("march.csv", &[BENCH])],
            &IngestOptions::default(),
        )
        .unwrap();
        assert_eq!(sets.len(), 2);
        // Survivor is the copy from the lexicographically smallest source
        assert_eq!(sets[0].source_id, "june.csv");
    }

    #[test]
    fn test_date_filter_applies_after_derivation() {
        let options = IngestOptions {
            filter: DateFilter {
                year: Some(2025),
                from: NaiveDate::from_ymd_opt(2025, 4, 1),
                to: None,
            },
            ..IngestOptions::default()
        };
        let sets = normalize(&[table("a.csv", &[BENCH, SQUAT])], &options).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].period, Period::Later);
        assert_eq!(sets[0].quarter, Quarter::Q2);
    }

    #[test]
    fn test_configurable_boundary() {
        let options = IngestOptions {
            boundary: PeriodBoundary::new(6).unwrap(),
            ..IngestOptions::default()
        };
        let sets = normalize(&[table("a.csv", &[SQUAT])], &options).unwrap();
        assert_eq!(sets[0].period, Period::Early);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let blank = [""; 11];
        let sets = normalize(&[table("a.csv", &[BENCH, blank])], &IngestOptions::default()).unwrap();
        assert_eq!(sets.len(), 1);
    }
}
