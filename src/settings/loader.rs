use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::{ProviderError, Result, Scope, Settings, is_valid_key};

/// Resolves an identifier to a namespace of named values.
///
/// This is the seam for "load the settings object called X": a lookup table,
/// generated code or any other static registration can sit behind it. The
/// store only consumes the pairs it yields and keeps the upper-case names.
///
/// Closures with the matching signature are providers too.
pub trait NamespaceProvider<V = Value> {
    /// Produces every field of the namespace named `identifier`.
    ///
    /// # Errors
    /// Returns `ProviderError::NotFound` if nothing is registered under
    /// `identifier`, or `ProviderError::Failed` if it cannot be produced.
    fn resolve(&self, identifier: &str) -> std::result::Result<Vec<(String, V)>, ProviderError>;
}

impl<V, F> NamespaceProvider<V> for F
where
    F: Fn(&str) -> std::result::Result<Vec<(String, V)>, ProviderError>,
{
    fn resolve(&self, identifier: &str) -> std::result::Result<Vec<(String, V)>, ProviderError> {
        self(identifier)
    }
}

/// A lookup table of statically registered namespaces.
#[derive(Debug, Clone)]
pub struct NamespaceRegistry<V = Value> {
    namespaces: IndexMap<String, IndexMap<String, V>>,
}

impl<V> NamespaceRegistry<V> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            namespaces: IndexMap::new(),
        }
    }

    /// Registers `fields` under `identifier`, replacing any previous entry.
    pub fn register<I, K>(&mut self, identifier: impl Into<String>, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let fields = fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.namespaces.insert(identifier.into(), fields);
        self
    }

    /// Whether a namespace is registered under `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.namespaces.contains_key(identifier)
    }
}

impl<V> Default for NamespaceRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> NamespaceProvider<V> for NamespaceRegistry<V> {
    fn resolve(&self, identifier: &str) -> std::result::Result<Vec<(String, V)>, ProviderError> {
        self.namespaces
            .get(identifier)
            .map(|fields| {
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .ok_or_else(|| ProviderError::NotFound(identifier.to_string()))
    }
}

impl<V> Settings<V> {
    /// Writes every pair through [`Settings::set`] at the active level.
    ///
    /// Not transactional: if a pair fails, the pairs before it stay written.
    ///
    /// # Errors
    /// Returns the first error raised by `set`.
    pub fn merge_mapping<I, K>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Resolves `identifier` through `provider` and merges its upper-case fields.
    ///
    /// Fields whose names fail the naming rule are not settings and are
    /// ignored.
    ///
    /// # Errors
    /// Returns provider errors unchanged, then the first error raised by `set`.
    pub fn merge_namespace<P>(&mut self, provider: &P, identifier: &str) -> Result<()>
    where
        P: NamespaceProvider<V> + ?Sized,
    {
        let fields = provider.resolve(identifier)?;
        self.merge_mapping(fields.into_iter().filter(|(name, _)| is_valid_key(name)))
    }

    /// Merges the defaults namespace at the lowest level, skipping conflicts.
    ///
    /// A missing namespace is not an error. Returns whether it was found.
    ///
    /// # Errors
    /// Returns provider errors other than `NotFound`, and errors from `set`.
    pub fn load_defaults<P>(&mut self, provider: &P, identifier: &str) -> Result<bool>
    where
        P: NamespaceProvider<V> + ?Sized,
    {
        let fields = match provider.resolve(identifier) {
            Ok(fields) => fields,
            Err(ProviderError::NotFound(_)) => {
                debug!(identifier, "No defaults namespace found");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        let scope = Scope::at(self.priorities().lowest().name.as_str()).skipping_conflicts();
        self.with_unfrozen(scope, |settings| {
            settings.merge_mapping(fields.into_iter().filter(|(name, _)| is_valid_key(name)))
        })?;

        Ok(true)
    }

    /// Builds a frozen store from `pairs` written at `level`.
    ///
    /// # Errors
    /// Returns the first error raised by `set`.
    pub fn from_mapping<I, K>(pairs: I, level: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let mut settings = Self::new();
        settings.with_unfrozen(Scope::at(level), |s| s.merge_mapping(pairs))?;
        Ok(settings)
    }

    /// Builds a frozen store from a namespace written at `level`.
    ///
    /// # Errors
    /// Returns provider errors unchanged, then the first error raised by `set`.
    pub fn from_namespace<P>(provider: &P, identifier: &str, level: &str) -> Result<Self>
    where
        P: NamespaceProvider<V> + ?Sized,
    {
        let mut settings = Self::new();
        settings.with_unfrozen(Scope::at(level), |s| s.merge_namespace(provider, identifier))?;
        Ok(settings)
    }

    /// Builds a frozen store seeded from a defaults namespace.
    ///
    /// # Errors
    /// See [`Settings::load_defaults`].
    pub fn with_defaults<P>(provider: &P, identifier: &str) -> Result<Self>
    where
        P: NamespaceProvider<V> + ?Sized,
    {
        let mut settings = Self::new();
        settings.load_defaults(provider, identifier)?;
        Ok(settings)
    }
}
