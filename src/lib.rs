//! lifesim - Lifestyle Risk Simulator
//!
//! Scores illustrative disease risk from a handful of lifestyle habits and
//! answers "what if" questions: what happens to each risk when habits
//! change, and which single habit is worth improving first.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`catalog`] - Habit definitions, impact weights and the score scale
//! - [`profile`] - Selected habit levels and their validation
//! - [`scoring`] - Weighted risk scores, comparisons and habit ranking
//! - [`simulator`] - Baseline/simulated sessions and reports
//! - [`config`] - TOML configuration loading and validation
//! - [`error`] - Custom error types and handling
//!
//! # Example
//!
//! ```rust
//! use lifesim::{Condition, HabitCatalog, HabitProfile, RiskScorer};
//!
//! let catalog = HabitCatalog::builtin();
//! let scorer = RiskScorer::new(&catalog);
//!
//! let baseline = HabitProfile::baseline(&catalog);
//! let quit_smoking = baseline.with_level("smoking", 0);
//!
//! assert!(scorer.score(&quit_smoking, Condition::Heart) < scorer.score(&baseline, Condition::Heart));
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod profile;
pub mod scoring;
pub mod simulator;

// Re-export commonly used types
pub use error::{LifesimError, Result};

pub use catalog::{
    Condition, Habit, HabitCatalog, HabitOption, ImpactWeights, Level, Polarity, ScoreScale,
};
pub use config::{ConfigLocations, ConfigValidator, LifesimConfig, LoadedConfig, ValidationReport};
pub use profile::{parse_override, HabitProfile};
pub use scoring::{
    ConditionComparison, HabitImpact, RiskComparison, RiskLevel, RiskPercent, RiskScorer,
    RiskThresholds,
};
pub use simulator::{SimulationReport, SimulationSession};
