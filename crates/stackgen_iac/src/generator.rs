//! Load, derive, hand off.

use std::path::Path;

use tracing::info;

use stackgen_config::{ConfigReader, PlatformConfig};

use crate::declaration::StackDeclaration;
use crate::error::IacResult;
use crate::mapper::StackMapper;
use crate::synth::{SynthesisOutput, Synthesizer};

/// Result of a successful generation run.
#[derive(Debug)]
pub struct Generation {
    pub stack: StackDeclaration,
    pub output: SynthesisOutput,
}

/// Read the configuration at `config_path` and synthesize its stack.
///
/// The synthesizer is only invoked once the configuration has been read and
/// validated in full; a bad configuration produces no declarations at all.
pub fn generate(config_path: &Path, synthesizer: &dyn Synthesizer) -> IacResult<Generation> {
    let config = ConfigReader::read_file(config_path)?;
    info!(
        "Config loaded for project {} (environment: {})",
        config.project, config.environment
    );
    generate_from(&config, synthesizer)
}

/// Synthesize the stack for an already loaded configuration.
pub fn generate_from(
    config: &PlatformConfig,
    synthesizer: &dyn Synthesizer,
) -> IacResult<Generation> {
    let stack = StackMapper::map(config);
    let output = synthesizer.synthesize(&stack)?;
    Ok(Generation { stack, output })
}
