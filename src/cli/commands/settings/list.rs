use std::sync::Arc;

use crate::{
    cli::{
        Command, CommandResult,
        formatting::{format_level, format_value},
        types::CommandMetadata,
    },
    settings::Settings,
};

use super::CATEGORY_NAME;

/// Command listing every setting with the level that wrote it.
pub struct ListCommand {
    settings: Arc<Settings>,
}

impl ListCommand {
    /// Creates a new ListCommand over the provided settings.
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

impl Command for ListCommand {
    fn execute(&self, _args: &[String]) -> CommandResult {
        let key_width = self.settings.keys().map(str::len).max().unwrap_or(0);
        let level_width = self
            .settings
            .entries()
            .map(|setting| setting.level().len())
            .max()
            .unwrap_or(0);

        let lines: Vec<String> = self
            .settings
            .entries()
            .map(|setting| {
                format!(
                    "{:<key_width$}  {}  {}",
                    setting.key(),
                    format_level(setting.level(), level_width),
                    format_value(setting.value()),
                )
            })
            .collect();

        Ok(lines.join("\n"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "list".to_string(),
            description: "List settings with their priority level".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["strata settings list".to_string()],
        }
    }
}
