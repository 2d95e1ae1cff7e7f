//! Configuration management for lifesim.
//!
//! Configuration lives in a TOML file. Every section is optional; an empty
//! file (or no file at all) yields the built-in catalog, the default
//! `×0.6 + 15` scale and the 30/60 risk bands.
//!
//! # Example lifesim.toml
//!
//! ```toml
//! [scale]
//! factor = 0.6
//! offset = 15.0
//!
//! [thresholds]
//! low_max = 30
//! moderate_max = 60
//!
//! [[habits]]
//! id = "sleep"
//! name = "Sleep Duration"
//! unit = "hours"
//! current_level = 40
//! optimal_level = 80
//! polarity = "higher_is_better"
//! options = [
//!     { label = "< 5 hrs", value = 20 },
//!     { label = "7-8 hrs", value = 80 },
//! ]
//! weights = { heart = 0.15, diabetes = 0.12, stroke = 0.18, thyroid = 0.25 }
//! ```
//!
//! A non-empty `[[habits]]` array replaces the built-in table entirely.

pub mod resolution;
pub mod validation;

pub use resolution::{ConfigLevel, ConfigLocations, ConfigSource};
pub use validation::{ConfigValidator, ValidationReport};

use crate::catalog::{Habit, HabitCatalog, ScoreScale};
use crate::error::{LifesimError, Result};
use crate::scoring::RiskThresholds;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Contents of a `lifesim.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifesimConfig {
    #[serde(default)]
    pub scale: ScoreScale,

    #[serde(default)]
    pub thresholds: RiskThresholds,

    /// Replacement habit table. Empty means the built-in table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub habits: Vec<Habit>,
}

impl LifesimConfig {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns `Toml` if the content is not valid TOML or does not match
    /// the expected schema.
    ///
    /// # Example
    ///
    /// ```
    /// use lifesim::config::LifesimConfig;
    ///
    /// let config = LifesimConfig::parse("[scale]\nfactor = 1.0\noffset = 0.0\n").unwrap();
    /// assert_eq!(config.scale.factor, 1.0);
    /// assert!(config.habits.is_empty());
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `Config` (carrying the path) if the file cannot be read or
    /// parsed.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LifesimError::config_with_path(format!("cannot read config: {}", e), path.to_path_buf())
        })?;
        let config = Self::parse(&content).map_err(|e| {
            LifesimError::config_with_path(format!("cannot parse config: {}", e), path.to_path_buf())
        })?;
        debug!(path = %path.display(), habits = config.habits.len(), "config file parsed");
        Ok(config)
    }

    /// Resolve and load the highest-priority config file that exists.
    ///
    /// Falls back to defaults when no candidate exists. An explicit path
    /// that does not exist is an error rather than a silent fallback.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the chosen file cannot be read or parsed, or if
    /// an explicit path is missing.
    pub fn load(locations: &ConfigLocations) -> Result<LoadedConfig> {
        if let Some(explicit) = locations.explicit_path() {
            if !explicit.is_file() {
                return Err(LifesimError::config_with_path(
                    "config file does not exist",
                    explicit.to_path_buf(),
                ));
            }
        }

        match locations.resolve() {
            Some(source) => {
                let config = Self::load_file(&source.path)?;
                info!(level = %source.level, path = %source.path.display(), "loaded configuration");
                Ok(LoadedConfig {
                    config,
                    source: Some(source),
                })
            }
            None => {
                debug!("no config file found, using built-in defaults");
                Ok(LoadedConfig {
                    config: Self::default(),
                    source: None,
                })
            }
        }
    }

    /// Build the validated catalog this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCatalog` or `ZeroConditionWeight` if the habit table
    /// or scale is unusable.
    pub fn catalog(&self) -> Result<HabitCatalog> {
        if self.habits.is_empty() {
            HabitCatalog::builtin().with_scale(self.scale)
        } else {
            HabitCatalog::new(self.habits.clone(), self.scale)
        }
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.thresholds
            .validate()
            .map_err(|reason| LifesimError::config(format!("thresholds: {}", reason)))?;
        self.catalog().map(|_| ())
    }
}

/// A configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: LifesimConfig,
    /// `None` when built-in defaults were used.
    pub source: Option<ConfigSource>,
}

impl LoadedConfig {
    /// Human-readable origin of the configuration.
    #[must_use]
    pub fn origin(&self) -> String {
        match &self.source {
            Some(source) => format!("{} ({})", source.path.display(), source.level),
            None => "built-in defaults".to_string(),
        }
    }
}
