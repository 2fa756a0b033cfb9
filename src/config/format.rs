use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::{Result, StrataError};

/// Document formats a configuration file can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();

        match extension.as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }

    /// Human readable name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ConfigFormat::Json => "JSON",
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Toml => "TOML",
        }
    }

    /// Decodes `content` into a flat mapping of top-level names to values.
    ///
    /// Blank documents and documents that decode to null yield an empty
    /// mapping. Nested tables are kept as values. TOML datetimes become
    /// their RFC 3339 text.
    ///
    /// # Errors
    /// Returns `StrataError::DecodeError` if the content is malformed, its
    /// top level is not a mapping, or it holds a NaN or infinite float.
    pub fn decode(self, content: &str, path: Option<&Path>) -> Result<IndexMap<String, Value>> {
        if content.trim().is_empty() {
            return Ok(IndexMap::new());
        }

        let document: Value = match self {
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| StrataError::decode(self.name(), e, path))?,
            ConfigFormat::Yaml => {
                let raw: serde_yaml::Value = serde_yaml::from_str(content)
                    .map_err(|e| StrataError::decode(self.name(), e, path))?;
                from_yaml("", raw).map_err(|e| StrataError::decode(self.name(), e, path))?
            }
            ConfigFormat::Toml => {
                let table: toml::Table = toml::from_str(content)
                    .map_err(|e| StrataError::decode(self.name(), e, path))?;
                from_toml("", toml::Value::Table(table))
                    .map_err(|e| StrataError::decode(self.name(), e, path))?
            }
        };

        match document {
            Value::Null => Ok(IndexMap::new()),
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(StrataError::decode(
                self.name(),
                format!("top-level document must be a mapping, found {}", kind(&other)),
                path,
            )),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

type Converted = std::result::Result<Value, String>;

fn from_yaml(at: &str, value: serde_yaml::Value) -> Converted {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Ok(Value::Null),
        Yaml::Bool(b) => Ok(Value::Bool(b)),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else {
                finite(at, n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Yaml::String(s) => Ok(Value::String(s)),
        Yaml::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| from_yaml(&format!("{at}[{i}]"), item))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Value::Array),
        Yaml::Mapping(mapping) => mapping
            .into_iter()
            .map(|(key, item)| {
                let key = yaml_key(at, key)?;
                let item = from_yaml(&child(at, &key), item)?;
                Ok((key, item))
            })
            .collect::<std::result::Result<serde_json::Map<_, _>, String>>()
            .map(Value::Object),
        Yaml::Tagged(tagged) => from_yaml(at, tagged.value),
    }
}

fn yaml_key(at: &str, key: serde_yaml::Value) -> std::result::Result<String, String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        _ => Err(format!(
            "mapping keys must be scalars (under '{}')",
            if at.is_empty() { "<root>" } else { at }
        )),
    }
}

fn from_toml(at: &str, value: toml::Value) -> Converted {
    use toml::Value as Toml;

    match value {
        Toml::String(s) => Ok(Value::String(s)),
        Toml::Integer(i) => Ok(Value::from(i)),
        Toml::Float(f) => finite(at, f),
        Toml::Boolean(b) => Ok(Value::Bool(b)),
        Toml::Datetime(dt) => Ok(Value::String(dt.to_string())),
        Toml::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| from_toml(&format!("{at}[{i}]"), item))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Value::Array),
        Toml::Table(table) => table
            .into_iter()
            .map(|(key, item)| {
                let item = from_toml(&child(at, &key), item)?;
                Ok((key, item))
            })
            .collect::<std::result::Result<serde_json::Map<_, _>, String>>()
            .map(Value::Object),
    }
}

fn finite(at: &str, f: f64) -> Converted {
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| format!("'{at}' holds {f}, which is not a finite number"))
}

fn child(at: &str, key: &str) -> String {
    if at.is_empty() {
        key.to_string()
    } else {
        format!("{at}.{key}")
    }
}
