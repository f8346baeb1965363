//! Handoff boundary to the external synthesis collaborator.

use std::path::PathBuf;

use crate::declaration::{StackDeclaration, StackIdentity};
use crate::error::IacResult;

/// Where a synthesized stack ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutput {
    pub stack: StackIdentity,
    /// Directory the provisioning tool should run in
    pub stack_dir: PathBuf,
    /// The artifact itself
    pub artifact: PathBuf,
}

impl SynthesisOutput {
    pub fn new(stack: StackIdentity, stack_dir: PathBuf, artifact: PathBuf) -> Self {
        Self {
            stack,
            stack_dir,
            artifact,
        }
    }
}

/// Turns a declaration set into a provisioning artifact.
///
/// Implementations own everything past the declaration model: artifact format,
/// layout on disk and whatever tooling consumes it.
#[cfg_attr(test, mockall::automock)]
pub trait Synthesizer {
    fn synthesize(&self, stack: &StackDeclaration) -> IacResult<SynthesisOutput>;
}
