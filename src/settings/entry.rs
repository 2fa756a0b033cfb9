use std::{any::Any, cmp::Ordering};

use serde::Serialize;

use super::{PriorityTable, Result, SettingsError};

/// A single stored setting: the value together with the level that wrote it.
///
/// Settings are immutable once built. The rank is resolved from the priority
/// table at construction and always matches the level name.
///
/// Equality is structural over level, name, value and rank. Ordering is only
/// meaningful between two settings of the same name, so it is exposed through
/// fallible methods instead of `PartialOrd`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Setting<V> {
    level: String,
    key: String,
    value: V,
    rank: u32,
}

impl<V> Setting<V> {
    /// Builds a setting, resolving the rank of `level` in `priorities`.
    ///
    /// # Errors
    /// Returns `SettingsError::UnknownLevel` if `level` is not registered.
    pub fn new(
        priorities: &PriorityTable,
        level: impl Into<String>,
        key: impl Into<String>,
        value: V,
    ) -> Result<Self> {
        let level = level.into();
        let rank = priorities.rank_of(&level)?;

        Ok(Self {
            level,
            key: key.into(),
            value,
            rank,
        })
    }

    /// Name of the level that wrote this setting.
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Setting name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Rank of the writing level.
    pub fn rank(&self) -> u32 {
        self.rank
    }

    /// Consumes the setting and returns its value.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Orders two settings of the same name by rank.
    ///
    /// # Errors
    /// Returns `SettingsError::KeyMismatch` if the names differ.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        if self.key != other.key {
            return Err(SettingsError::KeyMismatch {
                left: self.key.clone(),
                right: other.key.clone(),
            });
        }

        Ok(self.rank.cmp(&other.rank))
    }

    /// `self < other` for settings of the same name.
    ///
    /// # Errors
    /// Returns `SettingsError::KeyMismatch` if the names differ.
    pub fn try_lt(&self, other: &Self) -> Result<bool> {
        self.try_cmp(other).map(Ordering::is_lt)
    }

    /// `self <= other` for settings of the same name.
    ///
    /// # Errors
    /// Returns `SettingsError::KeyMismatch` if the names differ.
    pub fn try_le(&self, other: &Self) -> Result<bool> {
        self.try_cmp(other).map(Ordering::is_le)
    }

    /// `self > other` for settings of the same name.
    ///
    /// # Errors
    /// Returns `SettingsError::KeyMismatch` if the names differ.
    pub fn try_gt(&self, other: &Self) -> Result<bool> {
        self.try_cmp(other).map(Ordering::is_gt)
    }

    /// `self >= other` for settings of the same name.
    ///
    /// # Errors
    /// Returns `SettingsError::KeyMismatch` if the names differ.
    pub fn try_ge(&self, other: &Self) -> Result<bool> {
        self.try_cmp(other).map(Ordering::is_ge)
    }
}

impl<V: PartialEq + 'static> Setting<V> {
    /// Structural equality against a value of unknown type.
    ///
    /// # Errors
    /// Returns `SettingsError::IncomparableType` if `other` is not a `Setting<V>`.
    pub fn eq_any(&self, other: &dyn Any) -> Result<bool> {
        Ok(self == Self::downcast(other)?)
    }

    /// `self < other` against a value of unknown type.
    ///
    /// # Errors
    /// Returns `SettingsError::IncomparableType` if `other` is not a `Setting<V>`,
    /// or `SettingsError::KeyMismatch` if the names differ.
    pub fn lt_any(&self, other: &dyn Any) -> Result<bool> {
        self.try_lt(Self::downcast(other)?)
    }

    /// `self <= other` against a value of unknown type.
    ///
    /// # Errors
    /// Returns `SettingsError::IncomparableType` if `other` is not a `Setting<V>`,
    /// or `SettingsError::KeyMismatch` if the names differ.
    pub fn le_any(&self, other: &dyn Any) -> Result<bool> {
        self.try_le(Self::downcast(other)?)
    }

    fn downcast(other: &dyn Any) -> Result<&Self> {
        other
            .downcast_ref::<Self>()
            .ok_or(SettingsError::IncomparableType)
    }
}
