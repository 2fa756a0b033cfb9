use indexmap::IndexMap;
use serde::{Serialize, Serializer, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use super::{PriorityTable, Result, Setting, SettingsError, priority, scope::ScopeState};

/// A layered settings store.
///
/// Maps upper-case names to [`Setting`]s, each remembering the level that
/// wrote it. Reads are always allowed. Writes are only accepted while the
/// store is unfrozen through [`Settings::unfreeze`], and a write must come
/// from a level that strictly outranks the one already stored for that name.
///
/// Iteration follows insertion order, so repeated walks over an unchanged
/// store yield the same sequence.
#[derive(Debug, Clone)]
pub struct Settings<V = Value> {
    priorities: PriorityTable,
    data: IndexMap<String, Setting<V>>,
    pub(super) state: ScopeState,
}

impl<V> Settings<V> {
    /// Creates an empty, frozen store using the default priority table.
    pub fn new() -> Self {
        Self::with_priorities(PriorityTable::default())
    }

    /// Creates an empty, frozen store using a custom priority table.
    pub fn with_priorities(priorities: PriorityTable) -> Self {
        Self {
            priorities,
            data: IndexMap::new(),
            state: ScopeState::frozen(priority::PROJECT),
        }
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    /// Returns `SettingsError::KeyNotFound` if the key is absent.
    pub fn get(&self, key: &str) -> Result<&V> {
        self.data
            .get(key)
            .map(Setting::value)
            .ok_or_else(|| SettingsError::KeyNotFound(key.to_string()))
    }

    /// Returns the full setting stored under `key`, including its level.
    pub fn entry(&self, key: &str) -> Option<&Setting<V>> {
        self.data.get(key)
    }

    /// Returns the name of the level that wrote `key`.
    pub fn level_of(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(Setting::level)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Number of stored settings.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the store holds no settings.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates setting names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.data
            .iter()
            .map(|(key, setting)| (key.as_str(), setting.value()))
    }

    /// Iterates stored settings in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Setting<V>> {
        self.data.values()
    }

    /// The priority table used to rank writes.
    pub fn priorities(&self) -> &PriorityTable {
        &self.priorities
    }

    /// Whether writes are currently rejected.
    pub fn is_frozen(&self) -> bool {
        self.state.frozen
    }

    /// Level that writes are currently attributed to.
    pub fn active_level(&self) -> &str {
        &self.state.level
    }

    /// Whether conflicting writes are currently ignored instead of rejected.
    pub fn skip_on_conflict(&self) -> bool {
        self.state.skip_on_conflict
    }

    /// Writes `value` under `key` at the active level.
    ///
    /// If the key already exists and the active level does not strictly
    /// outrank the stored one, the write is either dropped silently (when
    /// the scope skips conflicts) or rejected.
    ///
    /// # Errors
    /// * `SettingsError::WriteWhileFrozen` - If the store is frozen
    /// * `SettingsError::InvalidKey` - If `key` is not an upper-case name
    /// * `SettingsError::UnknownLevel` - If the active level is not registered
    /// * `SettingsError::PriorityTooLow` - If the write loses arbitration and
    ///   conflicts are not skipped
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Result<()> {
        let key = key.into();

        if self.state.frozen {
            return Err(SettingsError::WriteWhileFrozen(key));
        }

        if !is_valid_key(&key) {
            return Err(SettingsError::InvalidKey(key));
        }

        let candidate = Setting::new(&self.priorities, self.state.level.as_str(), key, value)?;

        if let Some(existing) = self.data.get(candidate.key()) {
            if candidate.try_le(existing)? {
                if self.state.skip_on_conflict {
                    debug!(
                        key = candidate.key(),
                        level = candidate.level(),
                        existing = existing.level(),
                        "Skipping lower priority setting"
                    );
                    return Ok(());
                }

                return Err(SettingsError::PriorityTooLow {
                    key: candidate.key().to_string(),
                    existing: existing.level().to_string(),
                    attempted: candidate.level().to_string(),
                });
            }
        }

        debug!(
            key = candidate.key(),
            level = candidate.level(),
            "Setting accepted"
        );
        self.data.insert(candidate.key().to_string(), candidate);
        Ok(())
    }

    /// Removes `key` and returns its value.
    ///
    /// # Errors
    /// * `SettingsError::WriteWhileFrozen` - If the store is frozen
    /// * `SettingsError::KeyNotFound` - If the key is absent
    pub fn delete(&mut self, key: &str) -> Result<V> {
        if self.state.frozen {
            return Err(SettingsError::WriteWhileFrozen(key.to_string()));
        }

        let removed = self
            .data
            .shift_remove(key)
            .ok_or_else(|| SettingsError::KeyNotFound(key.to_string()))?;

        debug!(key, level = removed.level(), "Setting removed");
        Ok(removed.into_value())
    }
}

impl<V: Clone> Settings<V> {
    /// Copies the current values into a plain ordered map.
    ///
    /// Useful for handing configuration to code that expects ordinary
    /// key/value data rather than the store itself.
    pub fn snapshot(&self) -> IndexMap<String, V> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }
}

impl Settings<Value> {
    /// Deserializes the value under `key` into `T`.
    ///
    /// # Errors
    /// * `SettingsError::KeyNotFound` - If the key is absent
    /// * `SettingsError::TypeMismatch` - If the value does not fit `T`
    pub fn extract<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.get(key)?;

        serde_json::from_value(value.clone()).map_err(|e| SettingsError::TypeMismatch {
            key: key.to_string(),
            expected_type: std::any::type_name::<T>(),
            details: e.to_string(),
        })
    }
}

impl<V> Default for Settings<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Serialize> Serialize for Settings<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Checks a setting name against the naming rule.
///
/// Names are upper-case identifiers: ASCII upper-case letters, digits and
/// underscores, not starting with a digit, with at least one letter.
///
/// # Examples
///
/// ```
/// use strata::settings::is_valid_key;
///
/// assert!(is_valid_key("LOG_LEVEL"));
/// assert!(is_valid_key("_PRIVATE_2"));
/// assert!(!is_valid_key("log_level"));
/// assert!(!is_valid_key("2FA"));
/// ```
pub fn is_valid_key(key: &str) -> bool {
    let Some(first) = key.chars().next() else {
        return false;
    };

    !first.is_ascii_digit()
        && key.chars().any(|c| c.is_ascii_uppercase())
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
