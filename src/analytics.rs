//! Analysis pipeline entry point

use serde::{Deserialize, Serialize};

use crate::aggregate::{
    frequency_stats, imbalances, intensity, lift_progression, monthly_rollup, personal_records,
    summary, top_exercises, volume_by_category, CategoryVolume, ExerciseVolume, FrequencyStats,
    Imbalance, Intensity, LiftProgression, MonthlyRollup, PersonalRecord, RecordView, Scope,
    Summary,
};
use crate::classify::{default_major_lifts, LiftPattern};
use crate::compare::{
    balance_ratios, period_comparison, pr_comparison, quarterly_progression, upper_lower_ratio,
    PeriodComparison, PrComparison, PushPullBalance, QuarterSummary, UpperLowerBalance,
};
use crate::model::{Period, WorkoutSet};

/// Tunables for `compute`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Lifts tracked month by month, matched as plain name fragments
    pub major_lifts: Vec<String>,
    /// Lifts tracked quarter by quarter
    pub key_lifts: Vec<LiftPattern>,
    pub imbalance_threshold_pct: f64,
    pub top_exercises: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            major_lifts: default_major_lifts(),
            key_lifts: LiftPattern::big_three(),
            imbalance_threshold_pct: 15.0,
            top_exercises: 10,
        }
    }
}

/// A statistic computed over all records and over each period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ByPeriod<T> {
    pub all: T,
    pub early: T,
    pub later: T,
}

impl<T> ByPeriod<T> {
    fn compute(f: impl Fn(&Scope) -> T) -> Self {
        Self {
            all: f(&Scope::All),
            early: f(&Scope::period(Period::Early)),
            later: f(&Scope::period(Period::Later)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    pub summary: Summary,
    pub personal_records: Vec<PersonalRecord>,
    pub category_volume: ByPeriod<Vec<CategoryVolume>>,
    pub frequency: ByPeriod<FrequencyStats>,
    pub monthly: Vec<MonthlyRollup>,
    pub top_exercises: Vec<ExerciseVolume>,
    pub intensity: Intensity,
    /// Early to later
    pub pr_comparison: PrComparison,
    pub push_pull: ByPeriod<PushPullBalance>,
    pub upper_lower: ByPeriod<UpperLowerBalance>,
    pub period_comparison: PeriodComparison,
    pub quarterly: Vec<QuarterSummary>,
    pub lift_progression: Vec<LiftProgression>,
    pub imbalances: Vec<Imbalance>,
}

/// Run every analysis over normalized records
pub fn compute(records: &[WorkoutSet], config: &AnalysisConfig) -> AnalyticsResult {
    let raw = RecordView::raw(records);
    let working = raw.working_only();

    let category_volume = ByPeriod::compute(|scope| volume_by_category(&raw, scope));
    let imbalances = imbalances(&category_volume.all, config.imbalance_threshold_pct);

    let early = Scope::period(Period::Early);
    let later = Scope::period(Period::Later);

    AnalyticsResult {
        summary: summary(&raw),
        personal_records: personal_records(&working, &Scope::All),
        frequency: ByPeriod::compute(|scope| frequency_stats(&raw, scope)),
        monthly: monthly_rollup(&raw),
        top_exercises: top_exercises(&raw, config.top_exercises),
        intensity: intensity(&working),
        pr_comparison: pr_comparison(
            &personal_records(&working, &early),
            &personal_records(&working, &later),
        ),
        push_pull: ByPeriod::compute(|scope| balance_ratios(&raw, scope)),
        upper_lower: ByPeriod::compute(|scope| upper_lower_ratio(&raw, scope)),
        period_comparison: period_comparison(&raw.scoped(&early), &raw.scoped(&later)),
        quarterly: quarterly_progression(&raw, &config.key_lifts, config.top_exercises),
        lift_progression: config
            .major_lifts
            .iter()
            .filter_map(|name| lift_progression(&working, &LiftPattern::named(name)))
            .collect(),
        category_volume,
        imbalances,
    }
}
