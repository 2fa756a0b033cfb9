use std::{
    fmt,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

use crate::settings::SettingsError;

/// Error types for the Strata application.
///
/// Wraps store failures together with the failures of the layers that feed
/// the store: reading and decoding files, and setting up logging.
#[derive(Error, Debug)]
pub enum StrataError {
    /// The settings store rejected an operation
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Document decoding error with location context
    #[error("failed to parse {format} at '{location}': {details}")]
    DecodeError {
        /// Format being decoded (e.g. "JSON", "YAML")
        format: &'static str,
        /// Location of the document being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// The file extension does not map to a known format
    #[error("unsupported configuration format for '{0}': expected .json, .yaml, .yml or .toml")]
    UnsupportedFormat(PathBuf),

    /// Logging could not be initialized
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// A specialized `Result` type for Strata operations.
pub type Result<T> = result::Result<T, StrataError>;

impl StrataError {
    /// Creates a decoding error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `format` - Name of the format being decoded
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn decode(format: &'static str, error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        StrataError::DecodeError {
            format,
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error with file path context.
    pub fn io(error: impl fmt::Display, path: &Path) -> Self {
        StrataError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    /// Whether the failure came from the settings store itself.
    pub fn is_settings_error(&self) -> bool {
        matches!(self, StrataError::Settings(_))
    }
}
