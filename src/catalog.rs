//! Habit catalog: the static habit and weight tables behind the simulator.
//!
//! The catalog is immutable configuration. It is built once (either the
//! built-in table or one loaded from `lifesim.toml`), validated, and then
//! passed by reference to the scorer and to every profile operation.
//!
//! # Built-in Table
//!
//! | Habit | Polarity | Heart | Diabetes | Stroke | Thyroid |
//! |-------|----------|-------|----------|--------|---------|
//! | sleep | higher is better | 0.15 | 0.12 | 0.18 | 0.25 |
//! | sugar | lower is better | 0.12 | 0.35 | 0.08 | 0.05 |
//! | exercise | higher is better | 0.25 | 0.20 | 0.15 | 0.10 |
//! | smoking | lower is better | 0.30 | 0.08 | 0.25 | 0.15 |
//! | stress | lower is better | 0.18 | 0.10 | 0.20 | 0.30 |
//! | hydration | higher is better | 0.05 | 0.08 | 0.05 | 0.10 |
//!
//! # Example
//!
//! ```rust
//! use lifesim::catalog::{Condition, HabitCatalog};
//!
//! let catalog = HabitCatalog::builtin();
//! assert_eq!(catalog.len(), 6);
//!
//! let smoking = catalog.get("smoking").unwrap();
//! assert_eq!(smoking.weights.get(Condition::Heart), 0.30);
//! ```

use crate::error::{LifesimError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Habit level on the 0-100 scale used by every option set.
pub type Level = u8;

/// Upper bound of the level scale.
pub const MAX_LEVEL: Level = 100;

/// Health outcome scored by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Heart,
    Diabetes,
    Stroke,
    Thyroid,
}

impl Condition {
    /// Every condition, in display order.
    pub const ALL: [Condition; 4] = [
        Condition::Heart,
        Condition::Diabetes,
        Condition::Stroke,
        Condition::Thyroid,
    ];

    /// Human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Heart => "Heart Disease",
            Self::Diabetes => "Diabetes",
            Self::Stroke => "Stroke",
            Self::Thyroid => "Thyroid",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heart => write!(f, "heart"),
            Self::Diabetes => write!(f, "diabetes"),
            Self::Stroke => write!(f, "stroke"),
            Self::Thyroid => write!(f, "thyroid"),
        }
    }
}

impl std::str::FromStr for Condition {
    type Err = LifesimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "heart" => Ok(Self::Heart),
            "diabetes" => Ok(Self::Diabetes),
            "stroke" => Ok(Self::Stroke),
            "thyroid" => Ok(Self::Thyroid),
            _ => Err(LifesimError::UnknownCondition { name: s.to_string() }),
        }
    }
}

/// Direction in which a habit level is good for you.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// A high level is healthy (sleep, exercise). Adverse signal is `100 - level`.
    HigherIsBetter,
    /// A high level is harmful (sugar, smoking). Adverse signal is the level itself.
    LowerIsBetter,
}

impl Polarity {
    /// Adverse signal contributed by a level, in [0, 100].
    #[must_use]
    pub fn signal(&self, level: Level) -> f64 {
        let level = f64::from(level.min(MAX_LEVEL));
        match self {
            Self::HigherIsBetter => 100.0 - level,
            Self::LowerIsBetter => level,
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HigherIsBetter => write!(f, "higher is better"),
            Self::LowerIsBetter => write!(f, "lower is better"),
        }
    }
}

/// One selectable level of a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitOption {
    pub label: String,
    pub value: Level,
}

impl HabitOption {
    #[must_use]
    pub fn new(label: impl Into<String>, value: Level) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Per-condition impact weights of a single habit.
///
/// Missing conditions deserialize as zero and drop out of that
/// condition's weighted average entirely.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpactWeights {
    #[serde(default)]
    pub heart: f64,
    #[serde(default)]
    pub diabetes: f64,
    #[serde(default)]
    pub stroke: f64,
    #[serde(default)]
    pub thyroid: f64,
}

impl ImpactWeights {
    /// Creates weights in condition order: heart, diabetes, stroke, thyroid.
    #[must_use]
    pub fn new(heart: f64, diabetes: f64, stroke: f64, thyroid: f64) -> Self {
        Self {
            heart,
            diabetes,
            stroke,
            thyroid,
        }
    }

    /// Weight for one condition.
    #[must_use]
    pub fn get(&self, condition: Condition) -> f64 {
        match condition {
            Condition::Heart => self.heart,
            Condition::Diabetes => self.diabetes,
            Condition::Stroke => self.stroke,
            Condition::Thyroid => self.thyroid,
        }
    }

    /// Validates that every weight is a finite value in [0, 1].
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending weight.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for condition in Condition::ALL {
            let value = self.get(condition);
            if value.is_nan() {
                return Err(format!("{} weight is NaN", condition));
            }
            if value.is_infinite() {
                return Err(format!("{} weight is infinite", condition));
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} weight {} is outside [0, 1]", condition, value));
            }
        }
        Ok(())
    }
}

/// A lifestyle habit the user can adjust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Stable identifier used in profiles and on the command line.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unit label shown next to the options.
    #[serde(default)]
    pub unit: String,
    /// Level the user reports today; the baseline default.
    pub current_level: Level,
    /// Level the simulator treats as the healthy target.
    pub optimal_level: Level,
    pub polarity: Polarity,
    /// Selectable levels, in display order.
    pub options: Vec<HabitOption>,
    pub weights: ImpactWeights,
}

impl Habit {
    /// Adverse signal for a level according to this habit's polarity.
    #[must_use]
    pub fn signal(&self, level: Level) -> f64 {
        self.polarity.signal(level)
    }

    /// Option values in display order.
    #[must_use]
    pub fn option_values(&self) -> Vec<Level> {
        self.options.iter().map(|o| o.value).collect()
    }

    /// Returns true if `level` is one of the selectable options.
    #[must_use]
    pub fn allows(&self, level: Level) -> bool {
        self.options.iter().any(|o| o.value == level)
    }

    /// Label of the option with this exact level, if any.
    #[must_use]
    pub fn option_label(&self, level: Level) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == level)
            .map(|o| o.label.as_str())
    }

    /// Option value closest to `level`. Ties go to the lower value.
    #[must_use]
    pub fn nearest_option(&self, level: Level) -> Option<Level> {
        self.options
            .iter()
            .map(|o| o.value)
            .min_by_key(|v| (v.abs_diff(level), *v))
    }

    /// Healthiest selectable level.
    #[must_use]
    pub fn best_option(&self) -> Option<Level> {
        let values = self.options.iter().map(|o| o.value);
        match self.polarity {
            Polarity::HigherIsBetter => values.max(),
            Polarity::LowerIsBetter => values.min(),
        }
    }

    /// Least healthy selectable level.
    #[must_use]
    pub fn worst_option(&self) -> Option<Level> {
        let values = self.options.iter().map(|o| o.value);
        match self.polarity {
            Polarity::HigherIsBetter => values.min(),
            Polarity::LowerIsBetter => values.max(),
        }
    }
}

/// Affine rescale applied to the weighted-average adverse signal.
///
/// `score = round(average * factor + offset)`. The defaults squeeze any
/// profile into roughly 15-75%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreScale {
    #[serde(default = "default_factor")]
    pub factor: f64,
    #[serde(default = "default_offset")]
    pub offset: f64,
}

fn default_factor() -> f64 {
    0.6
}

fn default_offset() -> f64 {
    15.0
}

impl Default for ScoreScale {
    fn default() -> Self {
        Self {
            factor: default_factor(),
            offset: default_offset(),
        }
    }
}

impl ScoreScale {
    #[must_use]
    pub fn new(factor: f64, offset: f64) -> Self {
        Self { factor, offset }
    }

    /// Rescales a weighted average in [0, 100] to a rounded percentage.
    #[must_use]
    pub fn apply(&self, average: f64) -> i32 {
        round_half_up(average.clamp(0.0, 100.0) * self.factor + self.offset) as i32
    }

    /// Lowest and highest percentage this scale can produce.
    #[must_use]
    pub fn bounds(&self) -> (i32, i32) {
        let a = self.apply(0.0);
        let b = self.apply(100.0);
        (a.min(b), a.max(b))
    }

    fn validate(&self) -> Result<()> {
        if !self.factor.is_finite() || !self.offset.is_finite() {
            return Err(LifesimError::invalid_catalog(
                "scale factor and offset must be finite",
            ));
        }
        Ok(())
    }
}

/// Rounds halves toward positive infinity, so `-5.5` becomes `-5`.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// The validated habit table plus its score scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCatalog {
    habits: Vec<Habit>,
    #[serde(default)]
    scale: ScoreScale,
}

impl Default for HabitCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HabitCatalog {
    /// Builds and validates a catalog.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCatalog` or `ZeroConditionWeight` if the table is
    /// unusable for scoring.
    pub fn new(habits: Vec<Habit>, scale: ScoreScale) -> Result<Self> {
        let catalog = Self { habits, scale };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The six-habit table the simulator ships with.
    #[must_use]
    pub fn builtin() -> Self {
        use Polarity::{HigherIsBetter, LowerIsBetter};

        let habits = vec![
            builtin_habit(
                "sleep",
                "Sleep Duration",
                "hours",
                (40, 80),
                HigherIsBetter,
                &[
                    ("< 5 hrs", 20),
                    ("5-6 hrs", 40),
                    ("6-7 hrs", 60),
                    ("7-8 hrs", 80),
                    ("8+ hrs", 100),
                ],
                ImpactWeights::new(0.15, 0.12, 0.18, 0.25),
            ),
            builtin_habit(
                "sugar",
                "Sugar Intake",
                "level",
                (80, 20),
                LowerIsBetter,
                &[
                    ("Very High", 100),
                    ("High", 80),
                    ("Moderate", 50),
                    ("Low", 20),
                    ("Very Low", 0),
                ],
                ImpactWeights::new(0.12, 0.35, 0.08, 0.05),
            ),
            builtin_habit(
                "exercise",
                "Physical Activity",
                "mins/day",
                (30, 80),
                HigherIsBetter,
                &[
                    ("Sedentary", 10),
                    ("Light (15 min)", 30),
                    ("Moderate (30 min)", 50),
                    ("Active (45 min)", 70),
                    ("Very Active (60+ min)", 90),
                ],
                ImpactWeights::new(0.25, 0.20, 0.15, 0.10),
            ),
            builtin_habit(
                "smoking",
                "Smoking Status",
                "status",
                (60, 0),
                LowerIsBetter,
                &[
                    ("Heavy Smoker", 100),
                    ("Regular Smoker", 75),
                    ("Occasional", 50),
                    ("Former Smoker", 25),
                    ("Never Smoked", 0),
                ],
                ImpactWeights::new(0.30, 0.08, 0.25, 0.15),
            ),
            builtin_habit(
                "stress",
                "Stress Level",
                "level",
                (70, 20),
                LowerIsBetter,
                &[
                    ("Very High", 100),
                    ("High", 75),
                    ("Moderate", 50),
                    ("Low", 25),
                    ("Very Low", 0),
                ],
                ImpactWeights::new(0.18, 0.10, 0.20, 0.30),
            ),
            builtin_habit(
                "hydration",
                "Water Intake",
                "glasses/day",
                (40, 90),
                HigherIsBetter,
                &[
                    ("< 4 glasses", 20),
                    ("4-6 glasses", 40),
                    ("6-8 glasses", 60),
                    ("8-10 glasses", 80),
                    ("10+ glasses", 100),
                ],
                ImpactWeights::new(0.05, 0.08, 0.05, 0.10),
            ),
        ];

        Self {
            habits,
            scale: ScoreScale::default(),
        }
    }

    /// Returns a copy of this catalog with a different scale.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCatalog` if the scale is not finite.
    pub fn with_scale(mut self, scale: ScoreScale) -> Result<Self> {
        scale.validate()?;
        self.scale = scale;
        Ok(self)
    }

    /// Habits in table order.
    #[must_use]
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    #[must_use]
    pub fn scale(&self) -> ScoreScale {
        self.scale
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.habits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// Looks up a habit by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Looks up a habit by id, failing with `UnknownHabit`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownHabit` if no habit has this id.
    pub fn require(&self, id: &str) -> Result<&Habit> {
        self.get(id).ok_or_else(|| LifesimError::unknown_habit(id))
    }

    /// Sum of one condition's weights across all habits.
    #[must_use]
    pub fn total_weight(&self, condition: Condition) -> f64 {
        self.habits.iter().map(|h| h.weights.get(condition)).sum()
    }

    /// Checks the invariants scoring relies on.
    ///
    /// # Errors
    ///
    /// - `InvalidCatalog` for an empty table, duplicate ids, empty or
    ///   out-of-range option sets, out-of-range current/optimal levels,
    ///   or weights outside [0, 1].
    /// - `ZeroConditionWeight` when no habit weighs a condition.
    pub fn validate(&self) -> Result<()> {
        if self.habits.is_empty() {
            return Err(LifesimError::invalid_catalog("catalog has no habits"));
        }
        self.scale.validate()?;

        let mut seen = HashSet::new();
        for habit in &self.habits {
            if habit.id.trim().is_empty() {
                return Err(LifesimError::invalid_catalog("habit id cannot be empty"));
            }
            if !seen.insert(habit.id.as_str()) {
                return Err(LifesimError::invalid_catalog(format!(
                    "duplicate habit id '{}'",
                    habit.id
                )));
            }
            if habit.options.is_empty() {
                return Err(LifesimError::invalid_catalog(format!(
                    "habit '{}' has no options",
                    habit.id
                )));
            }
            if let Some(option) = habit.options.iter().find(|o| o.value > MAX_LEVEL) {
                return Err(LifesimError::invalid_catalog(format!(
                    "habit '{}' option '{}' has level {} above {}",
                    habit.id, option.label, option.value, MAX_LEVEL
                )));
            }
            for (what, level) in [
                ("current", habit.current_level),
                ("optimal", habit.optimal_level),
            ] {
                if level > MAX_LEVEL {
                    return Err(LifesimError::invalid_catalog(format!(
                        "habit '{}' {} level {} is above {}",
                        habit.id, what, level, MAX_LEVEL
                    )));
                }
            }
            habit.weights.validate().map_err(|reason| {
                LifesimError::invalid_catalog(format!("habit '{}': {}", habit.id, reason))
            })?;
        }

        for condition in Condition::ALL {
            if self.total_weight(condition) <= 0.0 {
                return Err(LifesimError::ZeroConditionWeight {
                    condition: condition.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Non-fatal oddities worth surfacing to whoever maintains the table.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for habit in &self.habits {
            if !habit.allows(habit.current_level) {
                warnings.push(format!(
                    "habit '{}' current level {} is not a selectable option",
                    habit.id, habit.current_level
                ));
            }
            if !habit.allows(habit.optimal_level) {
                warnings.push(format!(
                    "habit '{}' optimal level {} is not a selectable option",
                    habit.id, habit.optimal_level
                ));
            }
        }
        warnings
    }
}

fn builtin_habit(
    id: &str,
    name: &str,
    unit: &str,
    (current_level, optimal_level): (Level, Level),
    polarity: Polarity,
    options: &[(&str, Level)],
    weights: ImpactWeights,
) -> Habit {
    Habit {
        id: id.to_string(),
        name: name.to_string(),
        unit: unit.to_string(),
        current_level,
        optimal_level,
        polarity,
        options: options
            .iter()
            .map(|(label, value)| HabitOption::new(*label, *value))
            .collect(),
        weights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = HabitCatalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), 6);
        let ids: Vec<_> = catalog.habits().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["sleep", "sugar", "exercise", "smoking", "stress", "hydration"]
        );
    }

    #[test]
    fn test_builtin_polarity() {
        let catalog = HabitCatalog::builtin();
        for id in ["sugar", "smoking", "stress"] {
            assert_eq!(catalog.get(id).unwrap().polarity, Polarity::LowerIsBetter);
        }
        for id in ["sleep", "exercise", "hydration"] {
            assert_eq!(catalog.get(id).unwrap().polarity, Polarity::HigherIsBetter);
        }
    }

    #[test]
    fn test_builtin_warnings_flag_off_grid_optimal_levels() {
        let warnings = HabitCatalog::builtin().warnings();
        assert!(warnings.iter().any(|w| w.contains("'exercise' optimal level 80")));
        assert!(warnings.iter().any(|w| w.contains("'hydration' optimal level 90")));
        assert!(!warnings.iter().any(|w| w.contains("'sleep'")));
    }

    #[test]
    fn test_polarity_signal() {
        assert_eq!(Polarity::HigherIsBetter.signal(30), 70.0);
        assert_eq!(Polarity::LowerIsBetter.signal(30), 30.0);
        assert_eq!(Polarity::LowerIsBetter.signal(250), 100.0);
    }

    #[test]
    fn test_condition_from_str() {
        assert_eq!("Heart".parse::<Condition>().unwrap(), Condition::Heart);
        assert_eq!(" thyroid ".parse::<Condition>().unwrap(), Condition::Thyroid);
        assert!(matches!(
            "lung".parse::<Condition>(),
            Err(LifesimError::UnknownCondition { .. })
        ));
    }

    #[test]
    fn test_nearest_option() {
        let catalog = HabitCatalog::builtin();
        let sleep = catalog.get("sleep").unwrap();
        assert_eq!(sleep.nearest_option(55), Some(60));
        assert_eq!(sleep.nearest_option(50), Some(40));
        assert_eq!(sleep.nearest_option(0), Some(20));
        assert_eq!(sleep.nearest_option(100), Some(100));
    }

    #[test]
    fn test_best_and_worst_options() {
        let catalog = HabitCatalog::builtin();
        let exercise = catalog.get("exercise").unwrap();
        assert_eq!(exercise.best_option(), Some(90));
        assert_eq!(exercise.worst_option(), Some(10));
        let smoking = catalog.get("smoking").unwrap();
        assert_eq!(smoking.best_option(), Some(0));
        assert_eq!(smoking.worst_option(), Some(100));
    }

    #[test]
    fn test_round_half_up_matches_browser_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-5.5), -5.0);
        assert_eq!(round_half_up(-4.25), -4.0);
        assert_eq!(round_half_up(54.828), 55.0);
    }

    #[test]
    fn test_scale_bounds() {
        assert_eq!(ScoreScale::default().bounds(), (15, 75));
        assert_eq!(ScoreScale::new(1.0, 0.0).bounds(), (0, 100));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut habits = HabitCatalog::builtin().habits().to_vec();
        habits.push(habits[0].clone());
        let err = HabitCatalog::new(habits, ScoreScale::default()).unwrap_err();
        assert!(err.to_string().contains("duplicate habit id 'sleep'"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_option() {
        let mut habits = HabitCatalog::builtin().habits().to_vec();
        habits[1].options.push(HabitOption::new("Extreme", 120));
        let err = HabitCatalog::new(habits, ScoreScale::default()).unwrap_err();
        assert!(matches!(err, LifesimError::InvalidCatalog { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_weight() {
        let mut habits = HabitCatalog::builtin().habits().to_vec();
        habits[0].weights.stroke = -0.1;
        assert!(HabitCatalog::new(habits.clone(), ScoreScale::default()).is_err());
        habits[0].weights.stroke = f64::NAN;
        assert!(HabitCatalog::new(habits, ScoreScale::default()).is_err());
    }

    #[test]
    fn test_validate_rejects_weight_above_one() {
        let mut habits = HabitCatalog::builtin().habits().to_vec();
        habits[0].weights.heart = 1.5;
        let err = HabitCatalog::new(habits, ScoreScale::default()).unwrap_err();
        assert!(err.to_string().contains("heart weight 1.5 is outside [0, 1]"));
    }

    #[test]
    fn test_validate_rejects_infinite_weight() {
        let mut habits = HabitCatalog::builtin().habits().to_vec();
        habits[3].weights.diabetes = f64::INFINITY;
        let err = HabitCatalog::new(habits, ScoreScale::default()).unwrap_err();
        assert!(err.to_string().contains("diabetes weight is infinite"));
    }

    #[test]
    fn test_validate_rejects_empty_options() {
        let mut habits = HabitCatalog::builtin().habits().to_vec();
        habits[2].options.clear();
        let err = HabitCatalog::new(habits, ScoreScale::default()).unwrap_err();
        assert!(err.to_string().contains("habit 'exercise' has no options"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_current_and_optimal() {
        let mut habits = HabitCatalog::builtin().habits().to_vec();
        habits[2].current_level = 150;
        let err = HabitCatalog::new(habits, ScoreScale::default()).unwrap_err();
        assert!(err.to_string().contains("current level 150 is above 100"));

        let mut habits = HabitCatalog::builtin().habits().to_vec();
        habits[4].optimal_level = 101;
        let err = HabitCatalog::new(habits, ScoreScale::default()).unwrap_err();
        assert!(err.to_string().contains("optimal level 101 is above 100"));
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let mut habits = HabitCatalog::builtin().habits().to_vec();
        habits[1].id = "  ".to_string();
        let err = HabitCatalog::new(habits, ScoreScale::default()).unwrap_err();
        assert!(err.to_string().contains("habit id cannot be empty"));
    }

    #[test]
    fn test_validate_rejects_zero_condition_weight() {
        let mut habits = HabitCatalog::builtin().habits().to_vec();
        for habit in &mut habits {
            habit.weights.thyroid = 0.0;
        }
        let err = HabitCatalog::new(habits, ScoreScale::default()).unwrap_err();
        assert!(matches!(
            err,
            LifesimError::ZeroConditionWeight { ref condition } if condition == "thyroid"
        ));
    }

    #[test]
    fn test_validate_rejects_empty_catalog() {
        assert!(HabitCatalog::new(Vec::new(), ScoreScale::default()).is_err());
    }

    #[test]
    fn test_with_scale_rejects_non_finite() {
        let result = HabitCatalog::builtin().with_scale(ScoreScale::new(f64::INFINITY, 15.0));
        assert!(result.is_err());
    }
}
