//! Configuration file resolution.
//!
//! lifesim looks for a single config file, first match wins:
//!
//! 1. An explicit path (`--config`)
//! 2. `<project>/lifesim.toml`
//! 3. `{config_dir}/lifesim/config.toml` (e.g. `~/.config/lifesim/config.toml`)
//!
//! Files are not merged; the habit table is all-or-nothing.

use std::path::{Path, PathBuf};

/// File name looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = "lifesim.toml";

/// Where a configuration file sits in the lookup order.
///
/// Ordered from lowest to highest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLevel {
    /// User-specific configuration (lowest priority).
    User,
    /// Project-specific configuration.
    Project,
    /// Path passed on the command line (highest priority).
    Explicit,
}

impl std::fmt::Display for ConfigLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Project => write!(f, "project"),
            Self::Explicit => write!(f, "explicit"),
        }
    }
}

/// A candidate configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub level: ConfigLevel,
    pub path: PathBuf,
}

impl ConfigSource {
    #[must_use]
    pub fn new(level: ConfigLevel, path: PathBuf) -> Self {
        Self { level, path }
    }

    /// Returns true if the file exists on disk.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// The set of paths consulted when loading configuration.
#[derive(Debug, Clone)]
pub struct ConfigLocations {
    explicit: Option<PathBuf>,
    project: PathBuf,
    user: Option<PathBuf>,
}

impl ConfigLocations {
    /// Default locations for a project directory.
    #[must_use]
    pub fn new(project_dir: &Path) -> Self {
        Self {
            explicit: None,
            project: project_dir.join(PROJECT_CONFIG_FILE),
            user: Self::default_user_path(),
        }
    }

    /// Get the default user config path using the platform's config directory.
    ///
    /// Returns `{config_dir}/lifesim/config.toml`, or `None` if the config
    /// directory cannot be determined.
    #[must_use]
    pub fn default_user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lifesim").join("config.toml"))
    }

    /// Use an explicit config file ahead of every other location.
    #[must_use]
    pub fn with_explicit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    /// Set a custom user config path.
    #[must_use]
    pub fn with_user_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.user = Some(path.into());
        self
    }

    /// Skip the user-level config file.
    #[must_use]
    pub fn without_user(mut self) -> Self {
        self.user = None;
        self
    }

    #[must_use]
    pub fn explicit_path(&self) -> Option<&Path> {
        self.explicit.as_deref()
    }

    #[must_use]
    pub fn project_path(&self) -> &Path {
        &self.project
    }

    #[must_use]
    pub fn user_path(&self) -> Option<&Path> {
        self.user.as_deref()
    }

    /// Every candidate, highest priority first.
    #[must_use]
    pub fn candidates(&self) -> Vec<ConfigSource> {
        let mut candidates = Vec::with_capacity(3);
        if let Some(path) = &self.explicit {
            candidates.push(ConfigSource::new(ConfigLevel::Explicit, path.clone()));
        }
        candidates.push(ConfigSource::new(ConfigLevel::Project, self.project.clone()));
        if let Some(path) = &self.user {
            candidates.push(ConfigSource::new(ConfigLevel::User, path.clone()));
        }
        candidates
    }

    /// The highest-priority candidate that exists.
    #[must_use]
    pub fn resolve(&self) -> Option<ConfigSource> {
        self.candidates().into_iter().find(ConfigSource::exists)
    }
}
