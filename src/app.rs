//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads settings from the environment
//! - initializes logging
//! - parses CLI arguments
//! - prints the command output

use clap::Parser;
use log::debug;
use simple_logger::SimpleLogger;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::error::{AppError, EXIT_NUMERIC};

pub mod pipeline;

/// Entry point for the `npi` binary.
pub fn run() -> Result<(), AppError> {
    let mut settings = Settings::from_env()?;

    SimpleLogger::new()
        .with_level(settings.log_level)
        .init()
        .map_err(|e| AppError::new(EXIT_NUMERIC, format!("Failed to initialize logging: {e}")))?;

    // `npi` and `npi --r0 2.5` behave like `npi eval ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    if let Some(lang) = cli.lang {
        settings.lang = lang;
    }
    debug!("settings: {settings:?}");

    let out = match &cli.command {
        Command::Eval(args) => pipeline::run_eval(args, &settings)?,
        Command::Sweep(args) => pipeline::run_sweep(args, &settings)?,
        Command::Simulate(args) => pipeline::run_simulate(args, &settings)?,
        Command::Variables => crate::report::format_variables(settings.lang),
    };
    print!("{out}");
    Ok(())
}

/// Rewrite argv so `npi` defaults to `npi eval`.
///
/// Rules:
/// - `npi`                      -> `npi eval`
/// - `npi --r0 2.5 ...`         -> `npi eval --r0 2.5 ...`
/// - `npi --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("eval".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "eval" | "sweep" | "simulate" | "variables");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "eval flags".
    if arg1.starts_with('-') {
        argv.insert(1, "eval".to_string());
        return argv;
    }

    argv
}
