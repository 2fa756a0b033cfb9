use std::{fs, path::Path};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, instrument};

use super::ConfigFormat;
use crate::{
    Result, StrataError,
    settings::{Scope, Settings},
};

/// Reads and decodes a configuration file, choosing the format by extension.
///
/// # Errors
/// * `StrataError::UnsupportedFormat` - If the extension is not recognised
/// * `StrataError::IoError` - If the file cannot be read
/// * `StrataError::DecodeError` - If the content is malformed or not a mapping
pub fn read_document(path: &Path) -> Result<IndexMap<String, Value>> {
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| StrataError::UnsupportedFormat(path.to_path_buf()))?;

    let content = fs::read_to_string(path).map_err(|e| StrataError::io(e, path))?;
    let document = format.decode(&content, Some(path))?;

    debug!(
        path = %path.display(),
        format = format.name(),
        keys = document.len(),
        "Decoded configuration file"
    );
    Ok(document)
}

impl Settings<Value> {
    /// Merges the top-level entries of a configuration file at the active level.
    ///
    /// The store must already be unfrozen. Nested tables are stored as
    /// values under their top-level name.
    ///
    /// # Errors
    /// Returns read and decode errors from [`read_document`], then the first
    /// error raised by [`Settings::set`].
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let document = read_document(path)?;
        self.merge_mapping(document)?;
        Ok(())
    }

    /// Builds a frozen store from a configuration file written at `level`.
    ///
    /// # Errors
    /// See [`Settings::load_file`].
    pub fn from_file(path: &Path, level: &str) -> Result<Self> {
        let mut settings = Self::new();
        settings.with_unfrozen(Scope::at(level), |s| s.load_file(path))?;
        Ok(settings)
    }
}
