use thiserror::Error;

/// Errors raised by the settings store and its entries.
///
/// Every variant is raised synchronously by the operation that detected it.
/// Nothing is retried: the store is deterministic, so repeating the same
/// call with the same input fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// The level name is not registered in the priority table.
    #[error("unknown priority level '{0}'")]
    UnknownLevel(String),

    /// The priority table supplied at construction is malformed.
    #[error("invalid priority table: {0}")]
    InvalidPriorityTable(String),

    /// The key does not follow the upper-case naming rule.
    #[error("invalid setting name '{0}': names must be upper case identifiers")]
    InvalidKey(String),

    /// A setting was compared against something that is not a setting.
    #[error("cannot compare a setting with a value of another type")]
    IncomparableType,

    /// Two settings with different names were ordered against each other.
    #[error("cannot order setting '{left}' against setting '{right}'")]
    KeyMismatch {
        /// Name of the left-hand setting
        left: String,
        /// Name of the right-hand setting
        right: String,
    },

    /// A write was attempted outside an unfrozen scope.
    #[error("cannot modify '{0}': settings are frozen")]
    WriteWhileFrozen(String),

    /// A write did not strictly outrank the stored setting.
    #[error(
        "cannot overwrite '{key}' set at level '{existing}' from level '{attempted}': priority too low"
    )]
    PriorityTooLow {
        /// Name of the setting
        key: String,
        /// Level that wrote the stored value
        existing: String,
        /// Level of the rejected write
        attempted: String,
    },

    /// The key is not present in the store.
    #[error("setting '{0}' not found")]
    KeyNotFound(String),

    /// The stored value could not be converted into the requested type.
    #[error("setting '{key}' is not a valid {expected_type}: {details}")]
    TypeMismatch {
        /// Name of the setting
        key: String,
        /// Name of the requested type
        expected_type: &'static str,
        /// Conversion error details
        details: String,
    },

    /// A namespace provider failed; passed through as reported.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Errors reported by a [`NamespaceProvider`](super::NamespaceProvider).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// No namespace is known under the identifier.
    #[error("namespace '{0}' not found")]
    NotFound(String),

    /// The namespace exists but could not be produced.
    #[error("failed to load namespace '{identifier}': {details}")]
    Failed {
        /// Identifier that was requested
        identifier: String,
        /// Failure details from the provider
        details: String,
    },
}

/// A specialized `Result` type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
