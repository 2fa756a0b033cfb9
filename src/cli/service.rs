use std::sync::Arc;

use crate::settings::Settings;

use super::{
    CliError, CommandArg, CommandRegistry,
    formatting::{
        format_category, format_command, format_description, format_header, format_usage,
    },
};

/// High-level service for managing and executing CLI commands.
///
/// Provides a unified interface for command registration, discovery, and execution.
/// Commands are organized by category and can be listed or executed by name.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a new CLI service with all available commands registered.
    ///
    /// The frozen settings store is shared across the commands that read it.
    ///
    /// # Arguments
    /// * `settings` - Fully loaded settings store
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let mut registry = CommandRegistry::new(settings);
        registry.register_all_commands();

        CliService { registry }
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Arguments
    /// * `category` - Command category to search in
    /// * `command_name` - Name of the command to execute
    /// * `args` - Command-line arguments to pass to the command
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist in the category,
    /// or whatever the command itself fails with.
    pub fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        self.registry.execute(category, command_name, args)
    }

    /// Lists all available commands organized by category.
    ///
    /// # Returns
    /// Vector of (category_name, command_names) tuples
    pub fn list_all(&self) -> Vec<(String, Vec<String>)> {
        self.registry.list_commands()
    }

    /// Renders help text for every registered command.
    pub fn help(&self) -> String {
        let mut lines = vec![format_header("Commands:")];

        for (category, _) in self.list_all() {
            lines.push(format!("  {}", format_category(&category)));

            for metadata in self.registry.category_metadata(&category) {
                let args: Vec<String> = metadata.args.iter().map(arg_label).collect();

                lines.push(format!(
                    "    {} {}  {}",
                    format_command(&metadata.name),
                    args.join(" "),
                    format_description(&metadata.description)
                ));

                for arg in &metadata.args {
                    lines.push(format!(
                        "      {:<10}{}",
                        arg_label(arg),
                        format_description(&arg.description)
                    ));
                }

                for example in &metadata.examples {
                    lines.push(format!("      {}", format_usage(example)));
                }
            }
        }

        lines.join("\n")
    }
}

fn arg_label(arg: &CommandArg) -> String {
    if arg.required {
        format!("<{}>", arg.name)
    } else {
        format!("[{}]", arg.name)
    }
}
