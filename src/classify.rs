//! Exercise classification
//!
//! Exercise names are matched case-insensitively against an ordered lexicon
//! of name fragments. Categories are tried in declaration order (Chest, Back,
//! Legs, Shoulders, Arms, Core) and the first category owning a matching
//! fragment wins: "Chest Press Dumbbell Row" hits both Chest and Back and
//! resolves to Chest. Reordering `LEXICON` changes results.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Chest,
        Category::Back,
        Category::Legs,
        Category::Shoulders,
        Category::Arms,
        Category::Core,
        Category::Other,
    ];

    /// Categories whose share of volume is watched for imbalances
    pub const MAJOR: [Category; 4] = [
        Category::Chest,
        Category::Back,
        Category::Legs,
        Category::Shoulders,
    ];

    pub const PUSH: [Category; 2] = [Category::Chest, Category::Shoulders];
    pub const PULL: [Category; 1] = [Category::Back];
    pub const UPPER: [Category; 4] = [
        Category::Chest,
        Category::Back,
        Category::Shoulders,
        Category::Arms,
    ];
    pub const LOWER: [Category; 1] = [Category::Legs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Chest => "Chest",
            Category::Back => "Back",
            Category::Legs => "Legs",
            Category::Shoulders => "Shoulders",
            Category::Arms => "Arms",
            Category::Core => "Core",
            Category::Other => "Other",
        }
    }

    /// Canonical fragments for this category, in match order
    pub fn fragments(&self) -> &'static [&'static str] {
        LEXICON
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, fragments)| *fragments)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

const LEXICON: &[(Category, &[&str])] = &[
    (
        Category::Chest,
        &[
            "Bench Press",
            "Incline Bench Press",
            "Chest Press",
            "Chest Fly",
            "Decline Bench Press",
            "Floor Press",
            "Incline Chest Press",
        ],
    ),
    (
        Category::Back,
        &[
            "Dumbbell Row",
            "Seated Cable Row",
            "Bent Over Row",
            "Lat Pulldown",
            "Pull Up",
            "Chin Up",
            "T Bar Row",
            "Iso-Lateral Row",
            "Chest Supported Incline Row",
            "Single Arm Cable Row",
            "Gorilla Row",
            "Wide Pull Up",
        ],
    ),
    (
        Category::Legs,
        &[
            "Squat",
            "Deadlift",
            "Romanian Deadlift",
            "Leg Press",
            "Leg Extension",
            "Lying Leg Curl",
            "Hip Thrust",
            "Bulgarian Split Squat",
            "Split Squat",
            "Walking Lunge",
            "Hip Abduction",
            "Hip Adduction",
            "Seated Leg Curl",
            "Box step up",
            "Sumo Deadlift",
        ],
    ),
    (
        Category::Shoulders,
        &[
            "Overhead Press",
            "Shoulder Press",
            "Lateral Raise",
            "Rear Delt Reverse Fly",
            "Face Pull",
            "Arnold Press",
        ],
    ),
    (
        Category::Arms,
        &[
            "Bicep Curl",
            "Triceps Pushdown",
            "Triceps Dip",
            "Skullcrusher",
            "Preacher Curl",
            "Triceps Extension",
            "Triceps Rope Pushdown",
            "EZ Bar Biceps Curl",
            "Floor Triceps Dip",
        ],
    ),
    (
        Category::Core,
        &[
            "Decline Crunch",
            "Cable Crunch",
            "Side Bend",
            "Dragon Flag",
            "Plank",
            "Ab Wheel",
            "Jack Knife",
            "Crunch",
            "Landmine 180",
        ],
    ),
];

/// Map a free-text exercise name to its category. Total: never fails.
pub fn categorize(exercise_name: &str) -> Category {
    let name = exercise_name.to_lowercase();
    for (category, fragments) in LEXICON {
        if fragments
            .iter()
            .any(|fragment| name.contains(&fragment.to_lowercase()))
        {
            return *category;
        }
    }
    Category::Other
}

/// Named lift matcher: any include fragment must match, no exclude fragment may
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiftPattern {
    pub name: String,
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl LiftPattern {
    pub fn new(name: &str, include: &[&str], exclude: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// A pattern that matches its own name as a plain substring
    pub fn named(name: &str) -> Self {
        Self::new(name, &[name], &[])
    }

    pub fn matches(&self, exercise_name: &str) -> bool {
        let name = exercise_name.to_lowercase();
        let included = self
            .include
            .iter()
            .any(|fragment| name.contains(&fragment.to_lowercase()));
        included
            && !self
                .exclude
                .iter()
                .any(|fragment| name.contains(&fragment.to_lowercase()))
    }

    /// Bench press, squat and deadlift without their variations
    pub fn big_three() -> Vec<LiftPattern> {
        vec![
            LiftPattern::new("Bench Press", &["Bench Press"], &["Incline", "Decline", "Close"]),
            LiftPattern::new("Squat", &["Squat"], &["Bulgarian", "Split"]),
            LiftPattern::new("Deadlift", &["Deadlift"], &["Romanian", "Sumo"]),
        ]
    }
}

/// Lifts tracked month by month unless configured otherwise
pub fn default_major_lifts() -> Vec<String> {
    [
        "Bench Press",
        "Deadlift",
        "Squat",
        "Overhead Press",
        "Pull Up",
        "Hip Thrust",
        "Romanian Deadlift",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_common_lifts() {
        assert_eq!(categorize("Bench Press (Barbell)"), Category::Chest);
        assert_eq!(categorize("Lat Pulldown (Cable)"), Category::Back);
        assert_eq!(categorize("Squat (Barbell)"), Category::Legs);
        assert_eq!(categorize("Overhead Press (Dumbbell)"), Category::Shoulders);
        assert_eq!(categorize("Triceps Pushdown"), Category::Arms);
        assert_eq!(categorize("Cable Crunch"), Category::Core);
    }

    #[test]
    fn test_categorize_is_case_insensitive() {
        assert_eq!(categorize("BENCH PRESS"), Category::Chest);
        assert_eq!(categorize("romanian deadlift (barbell)"), Category::Legs);
    }

    #[test]
    fn test_categorize_falls_back_to_other() {
        assert_eq!(categorize("Treadmill"), Category::Other);
        assert_eq!(categorize(""), Category::Other);
    }

    #[test]
    fn test_declaration_order_resolves_ambiguity() {
        // Listed under Back and contains no Chest fragment
        assert_eq!(categorize("Chest Supported Incline Row"), Category::Back);
        // Hits Chest ("Chest Press") and Back ("Dumbbell Row"); Chest is declared first
        assert_eq!(categorize("Chest Press Dumbbell Row"), Category::Chest);
        // Hits Legs ("Squat") and Shoulders ("Overhead Press"); Legs is declared first
        assert_eq!(categorize("Squat to Overhead Press"), Category::Legs);
        assert_eq!(categorize("Decline Bench Press"), Category::Chest);
    }

    #[test]
    fn test_categorize_is_deterministic() {
        let names = ["Hip Thrust (Barbell)", "Face Pull", "Plank", "Mystery Machine"];
        for name in names {
            let first = categorize(name);
            for _ in 0..10 {
                assert_eq!(categorize(name), first);
            }
        }
    }

    #[test]
    fn test_lift_pattern_exclusions() {
        let big_three = LiftPattern::big_three();
        let bench = &big_three[0];
        assert!(bench.matches("Bench Press (Barbell)"));
        assert!(!bench.matches("Incline Bench Press (Dumbbell)"));
        assert!(!bench.matches("Close Grip Bench Press"));

        let squat = &big_three[1];
        assert!(squat.matches("Squat (Barbell)"));
        assert!(!squat.matches("Bulgarian Split Squat"));

        let deadlift = &big_three[2];
        assert!(deadlift.matches("Deadlift (Barbell)"));
        assert!(!deadlift.matches("Romanian Deadlift (Barbell)"));
        assert!(!deadlift.matches("Sumo Deadlift"));
    }

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!(!Category::Chest.fragments().is_empty());
        assert!(Category::Other.fragments().is_empty());
    }
}
