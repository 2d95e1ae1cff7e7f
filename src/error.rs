//! Custom error types for lifesim.
//!
//! This module provides structured error types that enable better
//! error handling, reporting, and exit-code selection in the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lifesim operations
#[derive(Error, Debug)]
pub enum LifesimError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Level is not one of the habit's selectable options
    #[error("Invalid level {level} for habit '{habit}' (allowed: {allowed:?})")]
    InvalidHabitLevel {
        habit: String,
        level: u8,
        allowed: Vec<u8>,
    },

    /// Habit id not present in the catalog
    #[error("Unknown habit: {id}")]
    UnknownHabit { id: String },

    /// Condition name that does not map to a known condition
    #[error("Unknown condition '{name}'. Valid options: heart, diabetes, stroke, thyroid")]
    UnknownCondition { name: String },

    /// Malformed `habit=level` override
    #[error("Invalid override '{input}': {reason}")]
    InvalidOverride { input: String, reason: String },

    // =========================================================================
    // Catalog Errors
    // =========================================================================
    /// Catalog failed validation
    #[error("Invalid catalog: {reason}")]
    InvalidCatalog { reason: String },

    /// A condition has no positive weight on any habit
    #[error("Condition '{condition}' has zero total weight across all habits")]
    ZeroConditionWeight { condition: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// TOML error wrapper
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl LifesimError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    /// Create a catalog validation error
    pub fn invalid_catalog(reason: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            reason: reason.into(),
        }
    }

    /// Create an unknown habit error
    pub fn unknown_habit(id: impl Into<String>) -> Self {
        Self::UnknownHabit { id: id.into() }
    }

    /// Create an override parse error
    pub fn invalid_override(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOverride {
            input: input.into(),
            reason: reason.into(),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Check if this error was caused by user-supplied input
    pub fn is_user_input(&self) -> bool {
        self.exit_code() == 2
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidHabitLevel { .. }
            | Self::UnknownHabit { .. }
            | Self::UnknownCondition { .. }
            | Self::InvalidOverride { .. } => 2,
            Self::InvalidCatalog { .. }
            | Self::ZeroConditionWeight { .. }
            | Self::Config { .. }
            | Self::Toml(_) => 7,
        }
    }
}

/// Type alias for lifesim results
pub type Result<T> = std::result::Result<T, LifesimError>;
