use std::sync::Arc;

use crate::{
    cli::{CliError, Command, CommandResult, types::CommandMetadata},
    settings::Settings,
};

use super::CATEGORY_NAME;

/// Command printing the effective settings as a JSON document.
pub struct DumpCommand {
    settings: Arc<Settings>,
}

impl DumpCommand {
    /// Creates a new DumpCommand over the provided settings.
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

impl Command for DumpCommand {
    fn execute(&self, _args: &[String]) -> CommandResult {
        serde_json::to_string_pretty(self.settings.as_ref())
            .map_err(|e| CliError::Output(format!("failed to serialize settings: {e}")))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "dump".to_string(),
            description: "Print all settings as JSON".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["strata -c overrides.yaml settings dump".to_string()],
        }
    }
}
