//! stackgen CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Configuration could not be read
//! - 4: Configuration is invalid
//! - 5: Synthesis error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stackgen_config::ConfigError;
use stackgen_iac::IacError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIG_READ_ERROR: u8 = 3;
    pub const CONFIG_PARSE_ERROR: u8 = 4;
    pub const SYNTHESIS_ERROR: u8 = 5;
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(ExitCodes::INVALID_ARGS)
            } else {
                ExitCode::from(ExitCodes::SUCCESS)
            };
        }
    };

    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Synth(args) => commands::synth::execute(args, cli.quiet),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Inspect(args) => commands::inspect::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "stackgen=debug"
    } else if quiet {
        "stackgen=error"
    } else {
        "stackgen=info"
    };

    let mut filter = EnvFilter::from_default_env();
    for directive in ["warn", level] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    // Logging already initialized is not an error
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Map an error to its exit code.
fn categorize_error(e: &anyhow::Error) -> u8 {
    let config_error = e.downcast_ref::<ConfigError>().or_else(|| {
        match e.downcast_ref::<IacError>() {
            Some(IacError::Config(inner)) => Some(inner),
            _ => None,
        }
    });

    if let Some(config_error) = config_error {
        return if config_error.is_read() {
            ExitCodes::CONFIG_READ_ERROR
        } else {
            ExitCodes::CONFIG_PARSE_ERROR
        };
    }

    match e.downcast_ref::<IacError>() {
        Some(_) => ExitCodes::SYNTHESIS_ERROR,
        None => ExitCodes::GENERAL_ERROR,
    }
}
