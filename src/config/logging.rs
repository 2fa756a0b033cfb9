use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::settings::{Settings, SettingsError};

/// Setting that selects the log verbosity.
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// Setting that selects the console output format.
pub const LOG_FORMAT: &str = "LOG_FORMAT";
/// Setting naming a directory for rolling log files, or null to disable them.
pub const LOG_DIR: &str = "LOG_DIR";
/// Setting that toggles timestamps on console output.
pub const LOG_TIMESTAMPS: &str = "LOG_TIMESTAMPS";

/// Logging level for the application.
///
/// Controls the verbosity of log output, from critical errors only
/// to detailed trace information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only show errors.
    Error,

    /// Show warnings and errors.
    Warn,

    /// Show informational messages, warnings, and errors (default level).
    #[default]
    Info,

    /// Show debug information useful for troubleshooting.
    Debug,

    /// Show detailed trace information (very verbose).
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Console output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output.
    #[default]
    Pretty,

    /// Single-line human readable output.
    Compact,

    /// Newline-delimited JSON records.
    Json,
}

/// Logging options read out of a settings store.
///
/// Field names follow the upper-case setting names (`LOG_LEVEL`, ...);
/// unrelated settings are ignored and missing ones fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct LoggingConfig {
    /// Maximum level emitted unless `RUST_LOG` overrides it.
    pub log_level: LogLevel,

    /// Console output format.
    pub log_format: LogFormat,

    /// Directory for daily rolling log files.
    pub log_dir: Option<PathBuf>,

    /// Whether console lines carry timestamps.
    pub log_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_format: LogFormat::default(),
            log_dir: None,
            log_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Reads the logging options from a snapshot of `settings`.
    ///
    /// # Errors
    /// Returns `SettingsError::TypeMismatch` if a logging setting holds a
    /// value of the wrong shape (e.g. an unknown level name).
    pub fn from_settings(settings: &Settings<Value>) -> Result<Self, SettingsError> {
        let snapshot = Value::Object(settings.snapshot().into_iter().collect());

        serde_json::from_value(snapshot).map_err(|e| SettingsError::TypeMismatch {
            key: "LOG_*".to_string(),
            expected_type: std::any::type_name::<Self>(),
            details: e.to_string(),
        })
    }
}
