//! Layered settings store with precedence arbitration.
//!
//! Each stored value remembers the precedence level that wrote it. A store is
//! frozen by default; [`Settings::unfreeze`] opens a scope at a level, and a
//! write inside it only replaces an existing value when its level strictly
//! outranks the stored one.

mod entry;
mod error;
mod loader;
pub mod priority;
mod scope;
mod store;

#[cfg(test)]
mod tests;

pub use entry::Setting;
pub use error::{ProviderError, Result, SettingsError};
pub use loader::{NamespaceProvider, NamespaceRegistry};
pub use priority::{Level, PriorityTable};
pub use scope::{Scope, Unfrozen};
pub use store::{Settings, is_valid_key};
