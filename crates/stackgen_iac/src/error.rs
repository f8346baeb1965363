//! Error types for declaration and synthesis.

use thiserror::Error;

use stackgen_config::ConfigError;

/// Result type alias for IaC operations.
pub type IacResult<T> = Result<T, IacError>;

/// Errors that can occur while producing or synthesizing a stack.
#[derive(Error, Debug)]
pub enum IacError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
