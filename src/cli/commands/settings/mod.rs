//! Read-only commands over the loaded settings.
mod dump;
mod get;
mod list;

use std::sync::Arc;

pub use dump::DumpCommand;
pub use get::GetCommand;
pub use list::ListCommand;

use crate::{cli::CommandRegistry, settings::Settings};

/// Category name the settings commands are registered under.
pub const CATEGORY_NAME: &str = "settings";

/// Registers all settings commands with the command registry.
///
/// # Arguments
///
/// * `registry` - Mutable reference to the command registry
/// * `settings` - Shared, frozen settings store for the commands
pub fn register_commands(registry: &mut CommandRegistry, settings: Arc<Settings>) {
    registry.register_command(Box::new(GetCommand::new(Arc::clone(&settings))));
    registry.register_command(Box::new(ListCommand::new(Arc::clone(&settings))));
    registry.register_command(Box::new(DumpCommand::new(settings)));
}
