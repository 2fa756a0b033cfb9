//! Command-line interface over the settings store.
//!
//! Parses the layered overrides, then dispatches to a hierarchical command
//! system. Commands are organized by category and generate their help text
//! from metadata.

mod args;
mod commands;
pub mod formatting;
mod registry;
mod service;
mod types;


pub use args::{Args, parse_setting};
pub use commands::settings::{DumpCommand, GetCommand, ListCommand};
pub use registry::CommandRegistry;
pub use service::CliService;
pub use types::{
    CliError, Command, CommandArg, CommandMetadata, CommandResult, EX_CONFIG, EX_FAILURE,
};
