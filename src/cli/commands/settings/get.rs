use std::sync::Arc;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_value,
        types::{CommandArg, CommandMetadata},
    },
    settings::Settings,
};

use super::CATEGORY_NAME;

/// Command for retrieving a single setting.
///
/// # Example Usage
///
/// ```bash
/// strata settings get LOG_LEVEL
/// strata -s TIMEOUT=30 settings get TIMEOUT
/// ```
pub struct GetCommand {
    settings: Arc<Settings>,
}

impl GetCommand {
    /// Creates a new GetCommand over the provided settings.
    ///
    /// # Arguments
    ///
    /// * `settings` - Shared reference to the settings store
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

impl Command for GetCommand {
    /// Retrieves and formats the value stored under a key.
    ///
    /// # Errors
    ///
    /// * `CliError::InvalidArguments` - If no key argument is provided
    /// * `CliError::Settings` - If the key is not set
    fn execute(&self, args: &[String]) -> CommandResult {
        let key = args.first().ok_or_else(|| {
            CliError::InvalidArguments("Expected <key> argument for 'get' command".to_string())
        })?;

        let value = self.settings.get(key)?;

        Ok(format!("{}: {}", key, format_value(value)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "get".to_string(),
            description: "Get a setting value".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "key".to_string(),
                description: "Setting name (e.g., LOG_LEVEL)".to_string(),
                required: true,
            }],
            examples: vec![
                "strata settings get LOG_LEVEL".to_string(),
                "strata -s TIMEOUT=30 settings get TIMEOUT".to_string(),
            ],
        }
    }
}
