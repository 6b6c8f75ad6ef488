//! Header resolution for raw tables

use crate::error::IngestError;

/// Logical fields a raw table can supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ExerciseName,
    SetIndex,
    SetType,
    Weight,
    Reps,
    StartTime,
    EndTime,
    WorkoutTitle,
    Distance,
    Duration,
    Rpe,
    Notes,
}

impl Field {
    pub const REQUIRED: [Field; 8] = [
        Field::ExerciseName,
        Field::SetIndex,
        Field::SetType,
        Field::Weight,
        Field::Reps,
        Field::StartTime,
        Field::EndTime,
        Field::WorkoutTitle,
    ];

    pub const OPTIONAL: [Field; 4] = [Field::Distance, Field::Duration, Field::Rpe, Field::Notes];

    pub fn name(&self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted header names; the first one is canonical
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::ExerciseName => &["exercise_name", "exercise_title", "exercise"],
            Field::SetIndex => &["set_index"],
            Field::SetType => &["set_type"],
            Field::Weight => &["weight", "weight_lbs", "weight_kg"],
            Field::Reps => &["reps"],
            Field::StartTime => &["start_time"],
            Field::EndTime => &["end_time"],
            Field::WorkoutTitle => &["workout_title", "title"],
            Field::Distance => &["distance", "distance_miles", "distance_km"],
            Field::Duration => &["duration", "duration_seconds"],
            Field::Rpe => &["rpe"],
            Field::Notes => &["notes", "exercise_notes"],
        }
    }
}

/// Column positions for one table
#[derive(Debug, Clone)]
pub struct ColumnMap {
    positions: Vec<(Field, usize)>,
}

impl ColumnMap {
    pub fn resolve(source_id: &str, headers: &[String]) -> Result<Self, IngestError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_ascii_lowercase())
            .collect();

        let find = |field: Field| {
            field
                .aliases()
                .iter()
                .find_map(|alias| normalized.iter().position(|h| h == alias))
        };

        let mut positions = vec![];
        for field in Field::REQUIRED {
            let idx = find(field).ok_or_else(|| IngestError::MissingRequiredColumn {
                source_id: source_id.to_string(),
                column: field.name().to_string(),
            })?;
            positions.push((field, idx));
        }
        for field in Field::OPTIONAL {
            if let Some(idx) = find(field) {
                positions.push((field, idx));
            }
        }

        Ok(Self { positions })
    }

    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, idx)| *idx)
    }

    /// Cell text for `field`, empty when the column or cell is absent
    pub fn cell<'a>(&self, row: &'a [String], field: Field) -> &'a str {
        self.position(field)
            .and_then(|idx| row.get(idx))
            .map(|s| s.trim())
            .unwrap_or("")
    }
}
