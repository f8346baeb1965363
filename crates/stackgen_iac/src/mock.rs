//! Recording synthesizer.
//!
//! Captures every stack handed to it instead of producing an artifact. Used by
//! integration tests and by dry runs, where the rendered document is printed
//! rather than written.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::declaration::StackDeclaration;
use crate::error::{IacError, IacResult};
use crate::synth::{SynthesisOutput, Synthesizer};

/// Synthesizer that records calls and writes nothing.
#[derive(Clone, Default)]
pub struct RecordingSynthesizer {
    /// Stacks received, in call order.
    captured: Arc<RwLock<Vec<StackDeclaration>>>,
    /// Simulated failure message.
    simulate_failure: Arc<RwLock<Option<String>>>,
}

impl RecordingSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every subsequent call with the given message.
    pub fn simulate_failure(self, message: impl Into<String>) -> Self {
        *self.simulate_failure.write() = Some(message.into());
        self
    }

    pub fn call_count(&self) -> usize {
        self.captured.read().len()
    }

    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// All stacks received so far.
    pub fn stacks(&self) -> Vec<StackDeclaration> {
        self.captured.read().clone()
    }

    pub fn last_stack(&self) -> Option<StackDeclaration> {
        self.captured.read().last().cloned()
    }

    pub fn clear(&self) {
        self.captured.write().clear();
    }
}

impl Synthesizer for RecordingSynthesizer {
    fn synthesize(&self, stack: &StackDeclaration) -> IacResult<SynthesisOutput> {
        self.captured.write().push(stack.clone());

        if let Some(msg) = self.simulate_failure.read().clone() {
            return Err(IacError::SynthesisFailed(msg));
        }

        let stack_dir = PathBuf::from("stacks").join(stack.identity.as_str());
        let artifact = stack_dir.join(crate::terraform::ARTIFACT_FILE);
        Ok(SynthesisOutput::new(stack.identity.clone(), stack_dir, artifact))
    }
}
