//! Inspect command - Print the derived declarations.

use anyhow::{Context, Result};
use clap::Args;

use stackgen_config::ConfigReader;
use stackgen_iac::StackMapper;

use super::ConfigArg;

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    config: ConfigArg,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let config = ConfigReader::read_file(&args.config.config)?;
    let stack = StackMapper::map(&config);

    let json = serde_json::to_string_pretty(&stack).context("Failed to serialize declarations")?;
    println!("{}", json);
    Ok(())
}
