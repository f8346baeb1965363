//! CLI command definitions.
//!
//! Every subcommand reads the same configuration document; they differ in
//! how far along the load → derive → synthesize pass they go.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use stackgen_config::DEFAULT_CONFIG_FILE;

pub mod inspect;
pub mod synth;
pub mod validate;

/// stackgen - JSON configuration to Terraform stack generator
#[derive(Parser)]
#[command(name = "stackgen")]
#[command(version, about = "stackgen - JSON configuration to Terraform stack generator")]
#[command(long_about = r#"
stackgen reads a developer-authored JSON configuration and turns it into a
Terraform JSON stack. Provisioning is left to the terraform CLI.

COMMANDS:
  synth     → Generate the Terraform JSON stack
  validate  → Check the configuration without generating anything
  inspect   → Print the derived declarations

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration could not be read
  4 - Configuration is invalid
  5 - Synthesis error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the Terraform JSON stack from the configuration
    Synth(synth::SynthArgs),

    /// Validate the configuration
    Validate(validate::ValidateArgs),

    /// Print the declarations derived from the configuration
    Inspect(inspect::InspectArgs),
}

/// Location of the configuration document, shared by all commands.
#[derive(Args, Debug, Clone)]
pub struct ConfigArg {
    /// Path to the JSON configuration
    #[arg(short, long, env = "STACKGEN_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}
