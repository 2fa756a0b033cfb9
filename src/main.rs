//! Strata entry point
//!
//! Loads defaults, project file, environment and command-line layers into
//! one frozen store, configures logging from it, then runs the requested
//! command. Configuration failures exit with `EX_CONFIG` (78); argument
//! errors are reported by clap with status 2.

use std::{env, process::ExitCode};

use clap::Parser;
use strata::{
    cli::{Args, CliError, CliService, formatting::format_error},
    config::LoggingConfig,
    tracing_config,
};
use tracing::{Level, info, span};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let settings = args.load_settings(env::vars())?;

    let logging = LoggingConfig::from_settings(&settings)?;
    let _guard = tracing_config::init(&logging)?;
    let _span = span!(Level::INFO, "strata_main").entered();

    tracing_config::log_runtime_info();
    info!(settings = settings.len(), "Settings loaded");

    let Some(category) = args.command.first() else {
        return Ok(());
    };

    let cli_service = CliService::new(settings);

    if category == "help" {
        println!("{}", cli_service.help());
        return Ok(());
    }

    let command = args.command.get(1).map(String::as_str).unwrap_or("");
    let command_args = args.command.get(2..).unwrap_or(&[]);

    let output = cli_service.execute_command(category, command, command_args)?;
    if !output.trim().is_empty() {
        println!("{output}");
    }

    Ok(())
}
