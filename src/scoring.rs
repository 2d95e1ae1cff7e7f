//! Risk scoring over habit profiles.
//!
//! Each condition's risk is a weighted average of per-habit adverse
//! signals, pushed through the catalog's fixed affine rescale.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ HabitProfile │────>│  RiskScorer  │────>│ score (15-75)│
//! └──────────────┘     │              │     └──────────────┘
//!                      │  catalog ────┼──── weights, polarity, scale
//!                      └──────┬───────┘
//!                             v
//!                ┌────────────────────────┐
//!                │ rank_habit_impact /    │
//!                │ compare (what-if)      │
//!                └────────────────────────┘
//! ```
//!
//! # Formula
//!
//! ```text
//! signal_i = level_i            (lower is better)
//!          = 100 - level_i      (higher is better)
//! average  = Σ signal_i·w_i[c] / Σ w_i[c]
//! score    = round(average · 0.6 + 15)
//! ```
//!
//! # Example
//!
//! ```rust
//! use lifesim::catalog::{Condition, HabitCatalog};
//! use lifesim::profile::HabitProfile;
//! use lifesim::scoring::RiskScorer;
//!
//! let catalog = HabitCatalog::builtin();
//! let scorer = RiskScorer::new(&catalog);
//! let baseline = HabitProfile::baseline(&catalog);
//!
//! assert_eq!(scorer.score(&baseline, Condition::Heart), 55);
//!
//! let ranking = scorer.rank_habit_impact(&baseline);
//! assert_eq!(ranking[0].habit_id, "smoking");
//! ```

use crate::catalog::{round_half_up, Condition, HabitCatalog};
use crate::profile::HabitProfile;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Risk percentage produced by the scorer.
pub type RiskPercent = i32;

/// Coarse classification of a risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Below 30 by default.
    Low,
    /// 30 up to 60 by default.
    Moderate,
    /// 60 and above by default.
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Moderate => write!(f, "moderate"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Upper bounds (exclusive) for each risk level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Score below which risk is low (default: 30).
    #[serde(default = "default_low_max")]
    pub low_max: RiskPercent,
    /// Score below which risk is moderate (default: 60).
    #[serde(default = "default_moderate_max")]
    pub moderate_max: RiskPercent,
}

fn default_low_max() -> RiskPercent {
    30
}

fn default_moderate_max() -> RiskPercent {
    60
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_max: default_low_max(),
            moderate_max: default_moderate_max(),
        }
    }
}

impl RiskThresholds {
    #[must_use]
    pub fn new(low_max: RiskPercent, moderate_max: RiskPercent) -> Self {
        Self {
            low_max,
            moderate_max,
        }
    }

    /// Classify a risk percentage.
    #[must_use]
    pub fn classify(&self, score: RiskPercent) -> RiskLevel {
        if score < self.low_max {
            RiskLevel::Low
        } else if score < self.moderate_max {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    /// Validates that the bands are ordered.
    ///
    /// # Errors
    ///
    /// Returns a description if `low_max` exceeds `moderate_max`.
    pub fn validate(&self) -> Result<(), String> {
        if self.low_max > self.moderate_max {
            return Err(format!(
                "low_max ({}) must not exceed moderate_max ({})",
                self.low_max, self.moderate_max
            ));
        }
        Ok(())
    }
}

/// Effect of moving a single habit to its optimal level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitImpact {
    pub habit_id: String,
    pub name: String,
    /// Change in aggregate risk, in percentage points. Negative is better.
    pub impact: i32,
}

impl HabitImpact {
    /// Returns true if optimizing this habit lowers aggregate risk.
    #[must_use]
    pub fn is_improvement(&self) -> bool {
        self.impact < 0
    }
}

/// Baseline versus simulated risk for one condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionComparison {
    pub condition: Condition,
    pub baseline: RiskPercent,
    pub simulated: RiskPercent,
    /// `simulated - baseline`.
    pub change: i32,
}

/// Baseline versus simulated risk across every condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskComparison {
    pub conditions: Vec<ConditionComparison>,
    pub total_baseline: RiskPercent,
    pub total_simulated: RiskPercent,
    /// `total_simulated - total_baseline`.
    pub risk_change: i32,
}

impl RiskComparison {
    /// Returns true if the simulated habits do not raise aggregate risk.
    #[must_use]
    pub fn is_improvement(&self) -> bool {
        self.risk_change <= 0
    }

    /// Comparison row for a condition.
    #[must_use]
    pub fn condition(&self, condition: Condition) -> Option<&ConditionComparison> {
        self.conditions.iter().find(|c| c.condition == condition)
    }
}

/// Pure scoring functions bound to a catalog.
#[derive(Debug, Clone, Copy)]
pub struct RiskScorer<'a> {
    catalog: &'a HabitCatalog,
    thresholds: RiskThresholds,
}

impl<'a> RiskScorer<'a> {
    /// Creates a scorer with default risk-level thresholds.
    #[must_use]
    pub fn new(catalog: &'a HabitCatalog) -> Self {
        Self {
            catalog,
            thresholds: RiskThresholds::default(),
        }
    }

    /// Sets the risk-level thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &'a HabitCatalog {
        self.catalog
    }

    #[must_use]
    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    /// Weighted-average adverse signal in [0, 100] before rescaling.
    ///
    /// Habits with no weight for the condition are skipped entirely.
    /// Returns `None` if no habit weighs the condition.
    #[must_use]
    pub fn weighted_signal(&self, profile: &HabitProfile, condition: Condition) -> Option<f64> {
        let mut risk = 0.0;
        let mut total_weight = 0.0;

        for habit in self.catalog.habits() {
            let weight = habit.weights.get(condition);
            if weight <= 0.0 {
                continue;
            }
            risk += habit.signal(profile.level(habit)) * weight;
            total_weight += weight;
        }

        if total_weight > 0.0 {
            Some(risk / total_weight)
        } else {
            None
        }
    }

    /// Risk percentage for one condition.
    ///
    /// A validated catalog always weighs every condition; should an
    /// unvalidated one not, the lower bound of the scale is returned.
    #[must_use]
    pub fn score(&self, profile: &HabitProfile, condition: Condition) -> RiskPercent {
        let scale = self.catalog.scale();
        match self.weighted_signal(profile, condition) {
            Some(average) => scale.apply(average),
            None => scale.bounds().0,
        }
    }

    /// Scores for every condition, in condition order.
    #[must_use]
    pub fn score_all(&self, profile: &HabitProfile) -> Vec<(Condition, RiskPercent)> {
        Condition::ALL
            .iter()
            .map(|&c| (c, self.score(profile, c)))
            .collect()
    }

    /// Rounded mean of the per-condition scores.
    #[must_use]
    pub fn aggregate(&self, profile: &HabitProfile) -> RiskPercent {
        round_half_up(f64::from(self.score_sum(profile)) / Condition::ALL.len() as f64)
            as RiskPercent
    }

    fn score_sum(&self, profile: &HabitProfile) -> i32 {
        Condition::ALL
            .iter()
            .map(|&c| self.score(profile, c))
            .sum()
    }

    /// Classify a risk percentage with this scorer's thresholds.
    #[must_use]
    pub fn classify(&self, score: RiskPercent) -> RiskLevel {
        self.thresholds.classify(score)
    }

    /// Ranks habits by how much optimizing each one alone changes the
    /// aggregate risk, most improving first.
    ///
    /// Ties keep catalog order.
    #[must_use]
    pub fn rank_habit_impact(&self, baseline: &HabitProfile) -> Vec<HabitImpact> {
        let baseline_total = self.score_sum(baseline);
        let conditions = Condition::ALL.len() as f64;

        let mut ranking: Vec<HabitImpact> = self
            .catalog
            .habits()
            .iter()
            .map(|habit| {
                let optimized = baseline.with_level(&habit.id, habit.optimal_level);
                let delta = self.score_sum(&optimized) - baseline_total;
                HabitImpact {
                    habit_id: habit.id.clone(),
                    name: habit.name.clone(),
                    impact: round_half_up(f64::from(delta) / conditions) as i32,
                }
            })
            .collect();

        // sort_by_key is stable
        ranking.sort_by_key(|entry| entry.impact);

        debug!(
            top = ranking.first().map(|r| r.habit_id.as_str()).unwrap_or(""),
            "ranked {} habits by impact",
            ranking.len()
        );
        ranking
    }

    /// Compares a simulated profile against a baseline.
    #[must_use]
    pub fn compare(&self, baseline: &HabitProfile, simulated: &HabitProfile) -> RiskComparison {
        let conditions: Vec<ConditionComparison> = Condition::ALL
            .iter()
            .map(|&condition| {
                let base = self.score(baseline, condition);
                let sim = self.score(simulated, condition);
                ConditionComparison {
                    condition,
                    baseline: base,
                    simulated: sim,
                    change: sim - base,
                }
            })
            .collect();

        let total_baseline = self.aggregate(baseline);
        let total_simulated = self.aggregate(simulated);

        RiskComparison {
            conditions,
            total_baseline,
            total_simulated,
            risk_change: total_simulated - total_baseline,
        }
    }
}
