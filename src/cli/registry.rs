use std::{collections::BTreeMap, sync::Arc};

use crate::settings::Settings;

use super::{CliError, Command, commands::settings, types::CommandMetadata};

/// Commands grouped by category and looked up by name.
///
/// Each command files itself under the category named in its metadata.
/// Categories and command names are kept sorted, so listings and help come
/// out in a stable order. Before a command runs, the registry checks the
/// argument count against the arguments its metadata declares.
///
/// ```text
/// settings
/// ├── dump
/// ├── get <key>
/// └── list
/// ```
pub struct CommandRegistry {
    categories: BTreeMap<String, BTreeMap<String, Box<dyn Command>>>,
    settings: Arc<Settings>,
}

impl CommandRegistry {
    /// Creates an empty registry over a shared, frozen settings store.
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            categories: BTreeMap::new(),
            settings,
        }
    }

    /// Adds `command` under its metadata's category, replacing any command
    /// of the same name there.
    pub fn register_command(&mut self, command: Box<dyn Command>) {
        let CommandMetadata { name, category, .. } = command.metadata();

        self.categories
            .entry(category)
            .or_default()
            .insert(name, command);
    }

    /// Registers the built-in commands over the registry's settings store.
    pub fn register_all_commands(&mut self) {
        let store = Arc::clone(&self.settings);
        settings::register_commands(self, store);
    }

    /// Runs `command_name` from `category` with `args`.
    ///
    /// # Errors
    /// * `CliError::CommandNotFound` - If the category or the command is unknown
    /// * `CliError::InvalidArguments` - If `args` holds fewer than the required
    ///   or more than the declared arguments
    /// * Whatever the command itself fails with
    pub fn execute(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        let command = self
            .categories
            .get(category)
            .ok_or_else(|| CliError::CommandNotFound(format!("no category '{category}'")))?
            .get(command_name)
            .ok_or_else(|| {
                CliError::CommandNotFound(format!("no command '{command_name}' in '{category}'"))
            })?;

        Self::check_arity(&command.metadata(), args)?;

        command.execute(args)
    }

    /// Category names with their command names, both in sorted order.
    pub fn list_commands(&self) -> Vec<(String, Vec<String>)> {
        self.categories
            .iter()
            .map(|(category, commands)| (category.clone(), commands.keys().cloned().collect()))
            .collect()
    }

    /// Metadata of every command in `category`, sorted by name.
    pub fn category_metadata(&self, category: &str) -> Vec<CommandMetadata> {
        self.categories
            .get(category)
            .map(|commands| commands.values().map(|c| c.metadata()).collect())
            .unwrap_or_default()
    }

    fn check_arity(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        let required = metadata.args.iter().filter(|arg| arg.required).count();
        let declared = metadata.args.len();

        if (required..=declared).contains(&args.len()) {
            return Ok(());
        }

        let expected = if required == declared {
            declared.to_string()
        } else {
            format!("{required} to {declared}")
        };

        Err(CliError::InvalidArguments(format!(
            "'{}' takes {expected} argument(s), got {}",
            metadata.name,
            args.len()
        )))
    }
}
