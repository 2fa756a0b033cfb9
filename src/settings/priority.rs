//! Precedence levels and the table that ranks them.

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

use super::{Result, SettingsError};

/// Built-in defaults shipped with the application.
pub const DEFAULT: &str = "default";
/// Project-level configuration files.
pub const PROJECT: &str = "project";
/// Values derived from the process environment.
pub const ENV: &str = "env";
/// Command-line overrides.
pub const CMD: &str = "cmd";

/// A named precedence level and its rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Level name used when opening a scope.
    pub name: String,
    /// Higher ranks win arbitration.
    pub rank: u32,
}

impl Level {
    /// Creates a level with the given name and rank.
    pub fn new(name: impl Into<String>, rank: u32) -> Self {
        Self {
            name: name.into(),
            rank,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.rank)
    }
}

/// An ordered set of precedence levels.
///
/// Levels are kept in ascending rank order. Construction rejects empty
/// tables, duplicate names and ranks that are not strictly increasing, so
/// every table totally orders its levels.
///
/// The table deserializes from a list of `{ name, rank }` records, which lets
/// a deployment describe its own tiers in a TOML or JSON document:
///
/// ```toml
/// levels = [
///     { name = "default", rank = 0 },
///     { name = "site", rank = 10 },
///     { name = "cmd", rank = 60 },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Level>", into = "Vec<Level>")]
pub struct PriorityTable {
    levels: Vec<Level>,
}

impl PriorityTable {
    /// Builds a table from levels listed lowest rank first.
    ///
    /// # Errors
    /// Returns `SettingsError::InvalidPriorityTable` if the list is empty,
    /// repeats a name, or does not strictly increase in rank.
    pub fn new(levels: Vec<Level>) -> Result<Self> {
        if levels.is_empty() {
            return Err(SettingsError::InvalidPriorityTable(
                "at least one level is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for level in &levels {
            if !seen.insert(level.name.as_str()) {
                return Err(SettingsError::InvalidPriorityTable(format!(
                    "level '{}' is declared more than once",
                    level.name
                )));
            }
        }

        for pair in levels.windows(2) {
            if pair[1].rank <= pair[0].rank {
                return Err(SettingsError::InvalidPriorityTable(format!(
                    "rank of '{}' must be greater than rank of '{}'",
                    pair[1], pair[0]
                )));
            }
        }

        Ok(Self { levels })
    }

    /// Returns the rank registered for `level`.
    ///
    /// # Errors
    /// Returns `SettingsError::UnknownLevel` if the name is not registered.
    pub fn rank_of(&self, level: &str) -> Result<u32> {
        self.levels
            .iter()
            .find(|candidate| candidate.name == level)
            .map(|candidate| candidate.rank)
            .ok_or_else(|| SettingsError::UnknownLevel(level.to_string()))
    }

    /// Whether `level` is registered.
    pub fn contains(&self, level: &str) -> bool {
        self.levels.iter().any(|candidate| candidate.name == level)
    }

    /// The level with the lowest rank, used for built-in defaults.
    pub fn lowest(&self) -> &Level {
        &self.levels[0]
    }

    /// The level with the highest rank.
    pub fn highest(&self) -> &Level {
        &self.levels[self.levels.len() - 1]
    }

    /// Iterates levels from lowest to highest rank.
    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}

impl Default for PriorityTable {
    fn default() -> Self {
        Self {
            levels: vec![
                Level::new(DEFAULT, 0),
                Level::new(PROJECT, 20),
                Level::new(ENV, 40),
                Level::new(CMD, 60),
            ],
        }
    }
}

impl TryFrom<Vec<Level>> for PriorityTable {
    type Error = SettingsError;

    fn try_from(levels: Vec<Level>) -> Result<Self> {
        Self::new(levels)
    }
}

impl From<PriorityTable> for Vec<Level> {
    fn from(table: PriorityTable) -> Self {
        table.levels
    }
}
