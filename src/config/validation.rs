//! Configuration validation for lifesim.
//!
//! Unlike [`LifesimConfig::validate`](super::LifesimConfig::validate), which
//! stops at the first problem, the validator collects every error and
//! warning into a [`ValidationReport`] for `lifesim config validate`.
//!
//! # Example
//!
//! ```rust,ignore
//! use lifesim::config::{ConfigLocations, ConfigValidator};
//! use std::path::Path;
//!
//! let validator = ConfigValidator::new(ConfigLocations::new(Path::new(".")));
//! let report = validator.validate();
//!
//! if !report.is_valid() {
//!     for error in &report.errors {
//!         eprintln!("Error: {}", error);
//!     }
//!     std::process::exit(report.exit_code());
//! }
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use super::{ConfigLocations, ConfigSource, LifesimConfig};
use crate::catalog::Condition;

/// Result of configuration validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Errors that prevent the configuration from being used.
    pub errors: Vec<String>,
    /// Warnings that don't prevent validity but indicate potential issues.
    pub warnings: Vec<String>,
    /// The file that was validated, if any was found.
    pub source: Option<ConfigSource>,
    /// Candidate files that were looked for.
    pub files_checked: Vec<PathBuf>,
}

impl ValidationReport {
    /// Create a new empty validation report.
    ///
    /// An empty report is considered valid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the configuration is valid (no errors).
    ///
    /// Warnings do not affect validity.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns 0 if valid, 1 if invalid.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.is_valid() {
            0
        } else {
            1
        }
    }

    /// Generate a human-readable summary of the validation result.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_valid() {
            if self.warnings.is_empty() {
                "Configuration is valid.".to_string()
            } else {
                format!(
                    "Configuration is valid with {} warning(s).",
                    self.warnings.len()
                )
            }
        } else {
            format!(
                "Configuration is invalid with {} error(s).",
                self.errors.len()
            )
        }
    }

    /// Generate a verbose report including all details.
    #[must_use]
    pub fn verbose_report(&self) -> String {
        let mut lines = vec![
            "Configuration Validation Report".to_string(),
            "\u{2500}".repeat(50),
            String::new(),
        ];

        match &self.source {
            Some(source) => lines.push(format!(
                "Config file: {} [{}]",
                source.path.display(),
                source.level
            )),
            None => lines.push("Config file: (none found, using built-in defaults)".to_string()),
        }

        if !self.files_checked.is_empty() {
            lines.push(String::new());
            lines.push(format!("Files checked ({}):", self.files_checked.len()));
            for file in &self.files_checked {
                lines.push(format!("  - {}", file.display()));
            }
        }

        if !self.errors.is_empty() {
            lines.push(String::new());
            lines.push(format!("Errors ({}):", self.errors.len()));
            for error in &self.errors {
                lines.push(format!("  \u{2717} {}", error));
            }
        }

        if !self.warnings.is_empty() {
            lines.push(String::new());
            lines.push(format!("Warnings ({}):", self.warnings.len()));
            for warning in &self.warnings {
                lines.push(format!("  \u{26a0} {}", warning));
            }
        }

        lines.push(String::new());
        lines.push(format!("Status: {}", self.summary()));

        lines.join("\n")
    }
}

/// Validates the resolved lifesim configuration.
#[derive(Debug, Clone)]
pub struct ConfigValidator {
    locations: ConfigLocations,
}

impl ConfigValidator {
    #[must_use]
    pub fn new(locations: ConfigLocations) -> Self {
        Self { locations }
    }

    /// Run all checks and collect the findings.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.files_checked = self
            .locations
            .candidates()
            .into_iter()
            .map(|c| c.path)
            .collect();

        if let Some(explicit) = self.locations.explicit_path() {
            if !explicit.is_file() {
                report
                    .errors
                    .push(format!("Config file does not exist: {}", explicit.display()));
                return report;
            }
        }

        let config = match self.locations.resolve() {
            Some(source) => {
                let loaded = LifesimConfig::load_file(&source.path);
                report.source = Some(source);
                match loaded {
                    Ok(config) => config,
                    Err(e) => {
                        report.errors.push(e.to_string());
                        return report;
                    }
                }
            }
            None => LifesimConfig::default(),
        };

        Self::check_config(&config, &mut report);
        report
    }

    /// Validate an already-parsed configuration.
    pub fn check_config(config: &LifesimConfig, report: &mut ValidationReport) {
        if let Err(reason) = config.thresholds.validate() {
            report.errors.push(format!("thresholds: {}", reason));
        }

        if !config.scale.factor.is_finite() || !config.scale.offset.is_finite() {
            report
                .errors
                .push("scale factor and offset must be finite".to_string());
        } else if config.scale.factor <= 0.0 {
            report.warnings.push(format!(
                "scale: factor {} does not increase with risk",
                config.scale.factor
            ));
        }

        if !config.habits.is_empty() {
            Self::check_habits(config, report);
        }

        // Catches anything the per-field checks above do not cover.
        match config.catalog() {
            Ok(catalog) => report.warnings.extend(catalog.warnings()),
            Err(e) => {
                let message = e.to_string();
                if !report.errors.iter().any(|existing| message.contains(existing.as_str())) {
                    report.errors.push(message);
                }
            }
        }
    }

    fn check_habits(config: &LifesimConfig, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for habit in &config.habits {
            if !seen.insert(habit.id.as_str()) {
                report
                    .errors
                    .push(format!("duplicate habit id '{}'", habit.id));
            }
            if habit.options.is_empty() {
                report
                    .errors
                    .push(format!("habit '{}' has no options", habit.id));
            }
            if let Err(reason) = habit.weights.validate() {
                report.errors.push(format!("habit '{}': {}", habit.id, reason));
            }
        }

        for condition in Condition::ALL {
            let total: f64 = config.habits.iter().map(|h| h.weights.get(condition)).sum();
            if total <= 0.0 {
                report.errors.push(format!(
                    "Condition '{}' has zero total weight across all habits",
                    condition
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validation_report_new_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.summary(), "Configuration is valid.");
    }

    #[test]
    fn test_validation_report_with_errors_is_invalid() {
        let mut report = ValidationReport::new();
        report.errors.push("Test error".to_string());
        assert!(!report.is_valid());
        assert_eq!(report.exit_code(), 1);
        assert!(report.verbose_report().contains("Test error"));
    }

    #[test]
    fn test_defaults_valid_with_warnings() {
        let temp = TempDir::new().unwrap();
        let validator = ConfigValidator::new(ConfigLocations::new(temp.path()).without_user());
        let report = validator.validate();
        assert!(report.is_valid());
        assert!(report.source.is_none());
        // built-in exercise/hydration optimal levels sit between options
        assert!(!report.warnings.is_empty());
        assert!(report.summary().contains("warning"));
    }

    #[test]
    fn test_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("lifesim.toml"), "[[habits]\n").unwrap();
        let validator = ConfigValidator::new(ConfigLocations::new(temp.path()).without_user());
        let report = validator.validate();
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("cannot parse config"));
    }

    #[test]
    fn test_reports_zero_weight_condition() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("lifesim.toml"),
            r#"
[[habits]]
id = "smoking"
name = "Smoking"
current_level = 100
optimal_level = 0
polarity = "lower_is_better"
options = [{ label = "Yes", value = 100 }, { label = "No", value = 0 }]
weights = { heart = 1.0 }
"#,
        )
        .unwrap();
        let validator = ConfigValidator::new(ConfigLocations::new(temp.path()).without_user());
        let report = validator.validate();
        assert!(!report.is_valid());
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("'diabetes' has zero total weight")));
        assert_eq!(
            report
                .errors
                .iter()
                .filter(|e| e.contains("zero total weight"))
                .count(),
            3
        );
    }

    #[test]
    fn test_reports_habit_without_options() {
        let config = LifesimConfig::parse(
            r#"
[[habits]]
id = "smoking"
name = "Smoking"
current_level = 100
optimal_level = 0
polarity = "lower_is_better"
options = []
weights = { heart = 1.0, diabetes = 1.0, stroke = 1.0, thyroid = 1.0 }
"#,
        )
        .unwrap();
        let mut report = ValidationReport::new();
        ConfigValidator::check_config(&config, &mut report);
        assert!(!report.is_valid());
        assert_eq!(
            report
                .errors
                .iter()
                .filter(|e| e.contains("habit 'smoking' has no options"))
                .count(),
            1
        );
    }

    #[test]
    fn test_reports_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let locations = ConfigLocations::new(temp.path())
            .without_user()
            .with_explicit_path(temp.path().join("missing.toml"));
        let report = ConfigValidator::new(locations).validate();
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("does not exist"));
    }

    #[test]
    fn test_reports_bad_thresholds() {
        let config = LifesimConfig::parse("[thresholds]\nlow_max = 80\nmoderate_max = 20\n").unwrap();
        let mut report = ValidationReport::new();
        ConfigValidator::check_config(&config, &mut report);
        assert!(!report.is_valid());
        assert!(report.errors[0].starts_with("thresholds:"));
    }
}
