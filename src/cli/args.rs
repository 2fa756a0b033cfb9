use std::path::PathBuf;

use clap::Parser;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::{
    Result,
    config::{self, DEFAULTS_NAMESPACE, builtin_namespaces, env::ENV_PREFIX, parse_literal},
    settings::{Scope, Settings, priority},
};

/// Layered settings for the command line.
///
/// Settings are assembled from built-in defaults, an optional project file,
/// `STRATA_*` environment variables and command-line overrides, in
/// ascending order of precedence.
#[derive(Debug, Clone, Parser)]
#[command(name = "strata", version, about)]
pub struct Args {
    /// Override a setting; VALUE is read as a literal (repeatable)
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE", value_parser = parse_setting)]
    pub settings: Vec<(String, Value)>,

    /// Read overrides from a JSON, YAML or TOML document
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project configuration file, loaded below environment overrides
    #[arg(short = 'p', long = "project", value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Command to run: CATEGORY COMMAND [ARGS...], or `help`
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Parses one `KEY=VALUE` override, splitting on the first `=`.
///
/// # Errors
/// Returns a message if the argument has no `=`.
pub fn parse_setting(raw: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;

    Ok((key.to_string(), parse_literal(value)))
}

impl Args {
    /// Combines the `--config` document and the `--setting` overrides.
    ///
    /// Both belong to the command-line layer; where they overlap, `--setting`
    /// wins, and a repeated `--setting` keeps its last value.
    ///
    /// # Errors
    /// Returns read and decode errors for the `--config` document.
    pub fn command_line_layer(&self) -> Result<IndexMap<String, Value>> {
        let mut layer = match &self.config {
            Some(path) => config::read_document(path)?,
            None => IndexMap::new(),
        };

        for (key, value) in &self.settings {
            layer.insert(key.clone(), value.clone());
        }

        Ok(layer)
    }

    /// Builds the frozen settings store from every layer.
    ///
    /// # Arguments
    /// * `env_vars` - Environment to scan for `STRATA_*` variables
    ///
    /// # Errors
    /// Returns layer read/decode failures and store arbitration failures.
    pub fn load_settings<I, K, V>(&self, env_vars: I) -> Result<Settings>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = Settings::with_defaults(&builtin_namespaces(), DEFAULTS_NAMESPACE)?;

        if let Some(project) = &self.project {
            settings.with_unfrozen(Scope::at(priority::PROJECT), |s| s.load_file(project))?;
        }

        let env_layer = config::env::collect(ENV_PREFIX, env_vars);
        debug!(keys = env_layer.len(), "Merging environment layer");
        settings.with_unfrozen(Scope::at(priority::ENV), |s| s.merge_mapping(env_layer))?;

        let cmd_layer = self.command_line_layer()?;
        debug!(keys = cmd_layer.len(), "Merging command-line layer");
        settings.with_unfrozen(Scope::at(priority::CMD), |s| s.merge_mapping(cmd_layer))?;

        Ok(settings)
    }
}
