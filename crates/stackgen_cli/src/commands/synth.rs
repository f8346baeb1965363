//! Synth command - Generate the Terraform JSON stack.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use stackgen_config::ConfigReader;
use stackgen_iac::mapper::VERSIONING_TYPE;
use stackgen_iac::{
    generate_from, render, StackDeclaration, StackMapper, TerraformJsonSynthesizer,
    DEFAULT_OUT_DIR,
};

use super::ConfigArg;

#[derive(Args)]
pub struct SynthArgs {
    #[command(flatten)]
    config: ConfigArg,

    /// Output directory for synthesized stacks
    #[arg(short, long, env = "STACKGEN_OUT", default_value = DEFAULT_OUT_DIR)]
    out: PathBuf,

    /// Print the Terraform JSON instead of writing it
    #[arg(long)]
    dry_run: bool,
}

pub fn execute(args: SynthArgs, quiet: bool) -> Result<()> {
    // Dry runs keep stdout for the document alone.
    let quiet = quiet || args.dry_run;
    let say = |msg: String| {
        if !quiet {
            println!("{}", msg);
        }
    };

    let config_path = &args.config.config;
    say(format!("📄 Reading {}...", config_path.display()));
    let config = ConfigReader::read_file(config_path)?;
    say(format!(
        "✓ Config loaded for project: {} (environment: {})\n",
        config.project, config.environment
    ));

    say("🏗️  Creating infrastructure from config...".to_string());

    if args.dry_run {
        let stack = StackMapper::map(&config);
        report_resources(&stack, &say);

        let document = serde_json::to_string_pretty(&render(&stack))
            .context("Failed to render Terraform JSON")?;
        println!("{}", document);
        info!("Dry run complete for stack {}", stack.identity);
        return Ok(());
    }

    let synthesizer = TerraformJsonSynthesizer::new(&args.out);
    say("\n📝 Synthesizing to Terraform JSON...".to_string());
    let generation = generate_from(&config, &synthesizer)?;
    report_resources(&generation.stack, &say);

    let stack_dir = generation.output.stack_dir.display();
    say("✓ Done!".to_string());
    say(format!("\n📁 Generated Terraform in: {}/", stack_dir));
    say("\nNext steps:".to_string());
    say(format!("  1. Review: cat {}", generation.output.artifact.display()));
    say(format!(
        "  2. Deploy: cd {} && terraform init && terraform apply",
        stack_dir
    ));

    Ok(())
}

fn report_resources(stack: &StackDeclaration, say: &impl Fn(String)) {
    if stack.resources_of_type(VERSIONING_TYPE).next().is_some() {
        say("  ✓ S3 Bucket with versioning enabled".to_string());
    } else {
        say("  ✓ S3 Bucket (no versioning)".to_string());
    }
}
