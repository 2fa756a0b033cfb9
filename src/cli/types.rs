use thiserror::Error;

use crate::{StrataError, settings::SettingsError};

/// Process exit status for configuration failures (`EX_CONFIG` in sysexits).
pub const EX_CONFIG: u8 = 78;

/// Process exit status for failures unrelated to configuration.
pub const EX_FAILURE: u8 = 1;

/// Errors that can occur during CLI command execution.
///
/// Settings failures are kept apart from everything else so the binary can
/// report them with a dedicated exit status.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid arguments were provided to a command.
    ///
    /// Returned when argument validation fails, such as missing required
    /// arguments or too many arguments.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The settings store rejected an operation.
    #[error("Configuration error: {0}")]
    Settings(#[from] SettingsError),

    /// A configuration layer or logging could not be set up.
    #[error(transparent)]
    Strata(#[from] StrataError),

    /// Command output could not be produced.
    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Exit status the binary reports for this error.
    ///
    /// Store failures map to [`EX_CONFIG`], everything else to [`EX_FAILURE`].
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Settings(_) => EX_CONFIG,
            CliError::Strata(e) if e.is_settings_error() => EX_CONFIG,
            _ => EX_FAILURE,
        }
    }
}

/// Type alias for command execution results.
///
/// All CLI commands return this type, providing either the text to print
/// or a CliError describing what went wrong.
pub type CommandResult = Result<String, CliError>;

/// Specification for a single command argument.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "key").
    pub name: String,

    /// Human-readable description shown in help output.
    pub description: String,

    /// Whether this argument must be given.
    pub required: bool,
}

/// Complete metadata for a CLI command.
///
/// Single source of truth for a command's identity, arguments, usage
/// examples and category. Used for help output and argument validation.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "get", "list").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Specification of all arguments this command accepts.
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,

    /// Category the registry files this command under (e.g., "settings").
    pub category: String,
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive their dependencies through their constructors.
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// The registry has already checked the argument count against the
    /// command's metadata.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for invalid argument values, store failures or
    /// output failures.
    fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
