//! Habit profiles: the selected level of every habit.
//!
//! A profile only stores levels that were set explicitly. Reading a level
//! for a habit the profile never touched yields that habit's current level,
//! so a profile always answers with exactly one level per catalog habit.

use crate::catalog::{Habit, HabitCatalog, Level};
use crate::error::{LifesimError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Mapping from habit id to selected level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitProfile {
    levels: BTreeMap<String, Level>,
}

impl HabitProfile {
    /// An empty profile; every habit reads as its current level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A profile with every habit pinned to its current level.
    #[must_use]
    pub fn baseline(catalog: &HabitCatalog) -> Self {
        Self {
            levels: catalog
                .habits()
                .iter()
                .map(|h| (h.id.clone(), h.current_level))
                .collect(),
        }
    }

    /// A profile with every habit at its optimal level.
    #[must_use]
    pub fn optimal(catalog: &HabitCatalog) -> Self {
        Self {
            levels: catalog
                .habits()
                .iter()
                .map(|h| (h.id.clone(), h.optimal_level))
                .collect(),
        }
    }

    /// Builds a profile from raw levels, validating each one.
    ///
    /// # Errors
    ///
    /// Returns `UnknownHabit` or `InvalidHabitLevel` for the first bad entry.
    pub fn from_levels<I, S>(catalog: &HabitCatalog, levels: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Level)>,
        S: AsRef<str>,
    {
        let mut profile = Self::new();
        for (id, level) in levels {
            profile.set_level(catalog, id.as_ref(), level)?;
        }
        Ok(profile)
    }

    /// Level of a habit, falling back to its current level.
    #[must_use]
    pub fn level(&self, habit: &Habit) -> Level {
        self.levels
            .get(&habit.id)
            .copied()
            .unwrap_or(habit.current_level)
    }

    /// Level stored for a habit id, without fallback.
    #[must_use]
    pub fn stored_level(&self, id: &str) -> Option<Level> {
        self.levels.get(id).copied()
    }

    /// Selects a level for a habit.
    ///
    /// The level must be one of the habit's options, or the habit's own
    /// current or optimal level (both are valid reset targets even when
    /// they fall between options).
    ///
    /// # Errors
    ///
    /// - `UnknownHabit` if the catalog has no such habit.
    /// - `InvalidHabitLevel` if the level is not selectable.
    pub fn set_level(&mut self, catalog: &HabitCatalog, id: &str, level: Level) -> Result<()> {
        let habit = catalog.require(id)?;
        if !is_selectable(habit, level) {
            return Err(LifesimError::InvalidHabitLevel {
                habit: habit.id.clone(),
                level,
                allowed: habit.option_values(),
            });
        }
        debug!(habit = %habit.id, level, "habit level set");
        self.levels.insert(habit.id.clone(), level);
        Ok(())
    }

    /// Selects the option closest to `level` and returns it.
    ///
    /// # Errors
    ///
    /// Returns `UnknownHabit` if the catalog has no such habit.
    pub fn set_level_clamped(
        &mut self,
        catalog: &HabitCatalog,
        id: &str,
        level: Level,
    ) -> Result<Level> {
        let habit = catalog.require(id)?;
        let snapped = if is_selectable(habit, level) {
            level
        } else {
            habit.nearest_option(level).unwrap_or(habit.current_level)
        };
        if snapped != level {
            debug!(habit = %habit.id, requested = level, snapped, "habit level snapped to option");
        }
        self.levels.insert(habit.id.clone(), snapped);
        Ok(snapped)
    }

    /// Returns a copy with one habit replaced, skipping validation.
    ///
    /// Used for hypothetical what-if profiles built from catalog values.
    #[must_use]
    pub fn with_level(&self, id: &str, level: Level) -> Self {
        let mut next = self.clone();
        next.levels.insert(id.to_string(), level);
        next
    }

    /// Resolved levels for every catalog habit, in catalog order.
    #[must_use]
    pub fn resolved(&self, catalog: &HabitCatalog) -> Vec<(String, Level)> {
        catalog
            .habits()
            .iter()
            .map(|h| (h.id.clone(), self.level(h)))
            .collect()
    }

    /// Habits whose resolved level differs from `other`'s.
    #[must_use]
    pub fn diff<'a>(&self, other: &Self, catalog: &'a HabitCatalog) -> Vec<&'a Habit> {
        catalog
            .habits()
            .iter()
            .filter(|h| self.level(h) != other.level(h))
            .collect()
    }

    /// Returns true if both profiles resolve to the same levels.
    #[must_use]
    pub fn same_levels(&self, other: &Self, catalog: &HabitCatalog) -> bool {
        self.diff(other, catalog).is_empty()
    }
}

fn is_selectable(habit: &Habit, level: Level) -> bool {
    habit.allows(level) || level == habit.current_level || level == habit.optimal_level
}

/// Parses a `habit=level` override as given on the command line.
///
/// # Errors
///
/// Returns `InvalidOverride` if the input is not `id=level` with a level
/// between 0 and 100.
pub fn parse_override(input: &str) -> Result<(String, Level)> {
    let (id, level) = input
        .split_once('=')
        .ok_or_else(|| LifesimError::invalid_override(input, "expected <habit>=<level>"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(LifesimError::invalid_override(input, "habit id is empty"));
    }
    let level: Level = level.trim().parse().map_err(|_| {
        LifesimError::invalid_override(input, "level must be an integer between 0 and 100")
    })?;
    if level > crate::catalog::MAX_LEVEL {
        return Err(LifesimError::invalid_override(
            input,
            "level must be an integer between 0 and 100",
        ));
    }
    Ok((id.to_string(), level))
}
