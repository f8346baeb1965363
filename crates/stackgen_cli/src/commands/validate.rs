//! Validate command - Check the configuration.

use anyhow::Result;
use clap::Args;
use tracing::info;

use stackgen_config::{ConfigError, ConfigReader, ConfigValidator};

use super::ConfigArg;

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    config: ConfigArg,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    let path = &args.config.config;
    info!("Validating configuration: {:?}", path);

    println!("📋 Validating {}...", path.display());

    // Decode first, then list every rule violation rather than stopping at one.
    let config = ConfigReader::read_unvalidated(path)?;
    let result = ConfigValidator::validate(&config);

    for warning in &result.warnings {
        println!("   ⚠️  {}", warning);
    }

    if !result.valid {
        println!("   ❌ Configuration validation failed:");
        for error in &result.errors {
            println!("      - {}", error);
        }
        return Err(ConfigError::parse(path.clone(), result.errors.join("; ")).into());
    }

    println!("   ✅ Configuration is valid");
    println!(
        "   project={} environment={} region={} bucket={} versioning={}",
        config.project,
        config.environment,
        config.region,
        config.storage.bucket_name,
        config.storage.enable_versioning
    );
    Ok(())
}
