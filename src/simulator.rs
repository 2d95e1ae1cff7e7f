//! What-if simulation sessions.
//!
//! A session tracks two profiles over the same catalog: the *baseline*
//! (habits as reported today) and the *simulated* profile the user edits.
//! Both start at every habit's current level. Only the simulated profile is
//! ever edited; [`SimulationSession::reset`] copies the baseline back over it.
//!
//! # Example
//!
//! ```rust
//! use lifesim::catalog::HabitCatalog;
//! use lifesim::simulator::SimulationSession;
//!
//! let catalog = HabitCatalog::builtin();
//! let mut session = SimulationSession::new(&catalog);
//!
//! session.simulate("smoking", 0).unwrap();
//! let report = session.report();
//! assert!(report.comparison.is_improvement());
//!
//! session.reset();
//! assert_eq!(session.report().comparison.risk_change, 0);
//! ```

use crate::catalog::{Condition, HabitCatalog, Level};
use crate::error::Result;
use crate::profile::HabitProfile;
use crate::scoring::{HabitImpact, RiskComparison, RiskLevel, RiskPercent, RiskScorer, RiskThresholds};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// One interactive what-if session.
#[derive(Debug, Clone)]
pub struct SimulationSession<'a> {
    id: Uuid,
    started_at: DateTime<Utc>,
    scorer: RiskScorer<'a>,
    baseline: HabitProfile,
    simulated: HabitProfile,
}

impl<'a> SimulationSession<'a> {
    /// Starts a session with both profiles at the catalog's current levels.
    #[must_use]
    pub fn new(catalog: &'a HabitCatalog) -> Self {
        Self::with_scorer(RiskScorer::new(catalog))
    }

    /// Starts a session with a preconfigured scorer.
    #[must_use]
    pub fn with_scorer(scorer: RiskScorer<'a>) -> Self {
        let baseline = HabitProfile::baseline(scorer.catalog());
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            scorer,
            simulated: baseline.clone(),
            baseline,
        };
        debug!(session = %session.id, "simulation session started");
        session
    }

    /// Sets the risk-level thresholds used in reports.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.scorer = self.scorer.with_thresholds(thresholds);
        self
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn baseline(&self) -> &HabitProfile {
        &self.baseline
    }

    #[must_use]
    pub fn simulated(&self) -> &HabitProfile {
        &self.simulated
    }

    /// Changes one habit in the simulated profile.
    ///
    /// # Errors
    ///
    /// Returns `UnknownHabit` or `InvalidHabitLevel` and leaves the
    /// simulated profile unchanged.
    pub fn simulate(&mut self, habit: &str, level: Level) -> Result<()> {
        let mut next = self.simulated.clone();
        next.set_level(self.scorer.catalog(), habit, level)?;
        self.simulated = next;
        Ok(())
    }

    /// Changes one habit, snapping the level to the nearest option.
    ///
    /// Returns the level actually applied.
    ///
    /// # Errors
    ///
    /// Returns `UnknownHabit` if the catalog has no such habit.
    pub fn simulate_clamped(&mut self, habit: &str, level: Level) -> Result<Level> {
        self.simulated
            .set_level_clamped(self.scorer.catalog(), habit, level)
    }

    /// Discards all simulated edits.
    pub fn reset(&mut self) {
        self.simulated = self.baseline.clone();
        debug!(session = %self.id, "simulated profile reset to baseline");
    }

    /// Returns true if the simulated profile has diverged from the baseline.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        !self
            .simulated
            .same_levels(&self.baseline, self.scorer.catalog())
    }

    /// Builds the full comparison report for the current state.
    #[must_use]
    pub fn report(&self) -> SimulationReport {
        let catalog = self.scorer.catalog();
        let comparison = self.scorer.compare(&self.baseline, &self.simulated);

        let habits = catalog
            .habits()
            .iter()
            .map(|habit| {
                let baseline = self.baseline.level(habit);
                let simulated = self.simulated.level(habit);
                HabitState {
                    habit_id: habit.id.clone(),
                    name: habit.name.clone(),
                    baseline,
                    baseline_label: habit.option_label(baseline).map(str::to_string),
                    simulated,
                    simulated_label: habit.option_label(simulated).map(str::to_string),
                    optimal: habit.optimal_level,
                }
            })
            .collect();

        let levels = comparison
            .conditions
            .iter()
            .map(|c| ConditionLevel {
                condition: c.condition,
                baseline: self.scorer.classify(c.baseline),
                simulated: self.scorer.classify(c.simulated),
            })
            .collect();

        let report = SimulationReport {
            session_id: self.id,
            started_at: self.started_at,
            generated_at: Utc::now(),
            total_baseline_level: self.scorer.classify(comparison.total_baseline),
            total_simulated_level: self.scorer.classify(comparison.total_simulated),
            priorities: self.scorer.rank_habit_impact(&self.baseline),
            habits,
            levels,
            comparison,
        };

        info!(
            session = %self.id,
            baseline = report.comparison.total_baseline,
            simulated = report.comparison.total_simulated,
            change = report.comparison.risk_change,
            "simulation report generated"
        );
        report
    }
}

/// Baseline and simulated level of one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitState {
    pub habit_id: String,
    pub name: String,
    pub baseline: Level,
    pub baseline_label: Option<String>,
    pub simulated: Level,
    pub simulated_label: Option<String>,
    pub optimal: Level,
}

impl HabitState {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.baseline != self.simulated
    }
}

/// Risk level bands for one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionLevel {
    pub condition: Condition,
    pub baseline: RiskLevel,
    pub simulated: RiskLevel,
}

/// Snapshot of a session: scores, deltas, bands and priorities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub habits: Vec<HabitState>,
    pub comparison: RiskComparison,
    pub levels: Vec<ConditionLevel>,
    pub total_baseline_level: RiskLevel,
    pub total_simulated_level: RiskLevel,
    /// Habits ranked by the gain from optimizing each one from the baseline.
    pub priorities: Vec<HabitImpact>,
}

impl SimulationReport {
    /// One-line verdict on the simulated changes.
    #[must_use]
    pub fn verdict(&self) -> &'static str {
        if self.comparison.is_improvement() {
            "Great! Your changes reduce health risks"
        } else {
            "These changes may increase risks"
        }
    }

    /// The habit worth optimizing first, if any improves risk.
    #[must_use]
    pub fn top_priority(&self) -> Option<&HabitImpact> {
        self.priorities.first().filter(|p| p.is_improvement())
    }

    /// Simulated score for a condition.
    #[must_use]
    pub fn simulated_score(&self, condition: Condition) -> Option<RiskPercent> {
        self.comparison.condition(condition).map(|c| c.simulated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifesimError;

    #[test]
    fn test_new_session_profiles_match() {
        let catalog = HabitCatalog::builtin();
        let session = SimulationSession::new(&catalog);
        assert_eq!(session.baseline(), session.simulated());
        assert!(!session.is_modified());
    }

    #[test]
    fn test_simulate_only_touches_simulated_profile() {
        let catalog = HabitCatalog::builtin();
        let mut session = SimulationSession::new(&catalog);
        session.simulate("sleep", 80).unwrap();

        assert_eq!(session.baseline().stored_level("sleep"), Some(40));
        assert_eq!(session.simulated().stored_level("sleep"), Some(80));
        assert!(session.is_modified());
    }

    #[test]
    fn test_invalid_simulation_leaves_state_unchanged() {
        let catalog = HabitCatalog::builtin();
        let mut session = SimulationSession::new(&catalog);
        let err = session.simulate("sleep", 55).unwrap_err();
        assert!(matches!(err, LifesimError::InvalidHabitLevel { .. }));
        assert!(!session.is_modified());
    }

    #[test]
    fn test_simulate_clamped() {
        let catalog = HabitCatalog::builtin();
        let mut session = SimulationSession::new(&catalog);
        assert_eq!(session.simulate_clamped("sugar", 10).unwrap(), 0);
    }

    #[test]
    fn test_reset_restores_baseline_scores() {
        let catalog = HabitCatalog::builtin();
        let mut session = SimulationSession::new(&catalog);
        session.simulate("smoking", 0).unwrap();
        session.simulate("stress", 0).unwrap();
        assert!(session.report().comparison.risk_change < 0);

        session.reset();
        let report = session.report();
        for row in &report.comparison.conditions {
            assert_eq!(row.baseline, row.simulated);
            assert_eq!(row.change, 0);
        }
        assert!(!session.is_modified());
    }

    #[test]
    fn test_report_contents() {
        let catalog = HabitCatalog::builtin();
        let mut session = SimulationSession::new(&catalog);
        session.simulate("smoking", 0).unwrap();
        let report = session.report();

        assert_eq!(report.session_id, session.id());
        assert_eq!(report.habits.len(), 6);
        let smoking = report.habits.iter().find(|h| h.habit_id == "smoking").unwrap();
        assert_eq!(smoking.baseline_label, None);
        assert_eq!(smoking.simulated_label.as_deref(), Some("Never Smoked"));
        assert!(smoking.is_changed());

        assert_eq!(report.comparison.total_baseline, 55);
        assert_eq!(report.total_baseline_level, RiskLevel::Moderate);
        assert_eq!(report.levels.len(), 4);
        assert_eq!(report.verdict(), "Great! Your changes reduce health risks");
        assert_eq!(report.top_priority().unwrap().habit_id, "smoking");
    }

    #[test]
    fn test_report_priorities_use_baseline() {
        let catalog = HabitCatalog::builtin();
        let mut session = SimulationSession::new(&catalog);
        let before = session.report().priorities;
        session.simulate("smoking", 0).unwrap();
        assert_eq!(session.report().priorities, before);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let catalog = HabitCatalog::builtin();
        let session = SimulationSession::new(&catalog);
        let json = serde_json::to_value(session.report()).unwrap();
        assert_eq!(json["comparison"]["total_baseline"], 55);
        assert_eq!(json["levels"][0]["condition"], "heart");
        assert_eq!(json["total_baseline_level"], "moderate");
    }

    #[test]
    fn test_custom_thresholds() {
        let catalog = HabitCatalog::builtin();
        let session =
            SimulationSession::new(&catalog).with_thresholds(RiskThresholds::new(20, 50));
        assert_eq!(session.report().total_baseline_level, RiskLevel::High);
    }
}
