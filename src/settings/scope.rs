use std::{
    marker::PhantomData,
    mem,
    ops::{Deref, DerefMut},
};

use serde_json::Value;
use tracing::trace;

use super::{Settings, priority};

/// Write state of a store: the level writes are attributed to, the
/// conflict policy, and whether writes are accepted at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScopeState {
    pub(crate) level: String,
    pub(crate) skip_on_conflict: bool,
    pub(crate) frozen: bool,
}

impl ScopeState {
    pub(crate) fn frozen(level: &str) -> Self {
        Self {
            level: level.to_string(),
            skip_on_conflict: false,
            frozen: true,
        }
    }
}

/// Parameters for an unfrozen scope.
///
/// The default scope writes at the `project` level and rejects conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    level: String,
    skip_on_conflict: bool,
}

impl Scope {
    /// A scope writing at `level` that rejects conflicting writes.
    pub fn at(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            skip_on_conflict: false,
        }
    }

    /// Drops conflicting writes silently instead of failing.
    pub fn skipping_conflicts(mut self) -> Self {
        self.skip_on_conflict = true;
        self
    }

    /// Level this scope writes at.
    pub fn level(&self) -> &str {
        &self.level
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::at(priority::PROJECT)
    }
}

/// Guard over a temporarily writable store.
///
/// Created by [`Settings::unfreeze`]. While it lives, writes through it are
/// attributed to the scope's level. Dropping it restores the level, conflict
/// policy and frozen flag that were in place before, including when the
/// scope is left through `?` or a panic.
///
/// Guards nest: unfreezing through a guard borrows it, so inner scopes must
/// end before outer ones. The guard is neither `Send` nor `Sync`, which
/// keeps a scope on the thread that opened it.
pub struct Unfrozen<'a, V = Value> {
    settings: &'a mut Settings<V>,
    saved: ScopeState,
    _thread_bound: PhantomData<*const ()>,
}

impl<V> Settings<V> {
    /// Unfreezes the store until the returned guard is dropped.
    ///
    /// The level is resolved lazily: opening a scope at an unregistered level
    /// succeeds, and each write inside it fails with `UnknownLevel`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use strata::settings::{Scope, Settings};
    ///
    /// let mut settings = Settings::new();
    /// {
    ///     let mut unfrozen = settings.unfreeze(Scope::at("default"));
    ///     unfrozen.set("A", json!(1)).unwrap();
    /// }
    /// assert!(settings.is_frozen());
    /// assert_eq!(settings.get("A").unwrap(), &json!(1));
    /// ```
    pub fn unfreeze(&mut self, scope: Scope) -> Unfrozen<'_, V> {
        let next = ScopeState {
            level: scope.level,
            skip_on_conflict: scope.skip_on_conflict,
            frozen: false,
        };
        trace!(level = %next.level, skip_on_conflict = next.skip_on_conflict, "Entering scope");

        let saved = mem::replace(&mut self.state, next);

        Unfrozen {
            settings: self,
            saved,
            _thread_bound: PhantomData,
        }
    }

    /// Runs `f` inside an unfrozen scope and refreezes afterwards.
    ///
    /// The previous state is restored whether `f` returns `Ok`, `Err`, or
    /// panics.
    ///
    /// # Errors
    /// Returns whatever `f` returns.
    pub fn with_unfrozen<T, E>(
        &mut self,
        scope: Scope,
        f: impl FnOnce(&mut Settings<V>) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut unfrozen = self.unfreeze(scope);
        f(&mut unfrozen)
    }
}

impl<V> Deref for Unfrozen<'_, V> {
    type Target = Settings<V>;

    fn deref(&self) -> &Self::Target {
        self.settings
    }
}

impl<V> DerefMut for Unfrozen<'_, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.settings
    }
}

impl<V> Drop for Unfrozen<'_, V> {
    fn drop(&mut self) {
        mem::swap(&mut self.settings.state, &mut self.saved);
        trace!(
            level = %self.settings.state.level,
            frozen = self.settings.state.frozen,
            "Leaving scope"
        );
    }
}
