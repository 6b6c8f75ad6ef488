//! Per-set metrics
//!
//! Estimated 1RM uses Brzycki for 2-10 reps and Epley above that, where
//! Brzycki's denominator would approach zero.

use serde::{Deserialize, Serialize};

const BRZYCKI_INTERCEPT: f64 = 1.0278;
const BRZYCKI_SLOPE: f64 = 0.0278;
const EPLEY_DIVISOR: f64 = 30.0;

/// Training load proxy: weight x reps
pub fn volume(weight: f64, reps: u32) -> f64 {
    weight * reps as f64
}

/// Estimated one-rep max for a set
pub fn estimated_1rm(weight: f64, reps: u32) -> f64 {
    if reps == 0 || weight == 0.0 {
        return 0.0;
    }
    if reps == 1 {
        return weight;
    }
    let reps = reps as f64;
    if reps > 10.0 {
        return weight * (1.0 + reps / EPLEY_DIVISOR);
    }
    // Denominator bottoms out at 0.7498 for 10 reps
    weight / (BRZYCKI_INTERCEPT - BRZYCKI_SLOPE * reps)
}

/// Rep ranges used for intensity breakdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepRange {
    /// 1-5 reps
    Heavy,
    /// 6-12 reps
    Moderate,
    /// 13+ reps
    High,
}

impl RepRange {
    pub const ALL: [RepRange; 3] = [RepRange::Heavy, RepRange::Moderate, RepRange::High];

    pub fn of(reps: u32) -> Self {
        match reps {
            0..=5 => RepRange::Heavy,
            6..=12 => RepRange::Moderate,
            _ => RepRange::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RepRange::Heavy => "Heavy (1-5)",
            RepRange::Moderate => "Moderate (6-12)",
            RepRange::High => "High (13+)",
        }
    }
}
