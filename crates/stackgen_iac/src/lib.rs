//! # stackgen_iac
//!
//! Infrastructure declarations derived from the platform configuration, and
//! their synthesis into Terraform JSON.
//!
//! This crate turns a [`PlatformConfig`](stackgen_config::PlatformConfig) into
//! one stack holding an S3 bucket, an optional versioning resource and two
//! outputs, then hands that stack to a [`Synthesizer`]. Planning, applying and
//! state management are left to the `terraform` CLI.
//!
//! ## Features
//!
//! - Typed declaration model with cross-resource references
//! - Pure config-to-declaration mapping
//! - Terraform JSON synthesis with a per-stack artifact and a manifest
//! - Recording synthesizer for tests
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use stackgen_iac::{generate, TerraformJsonSynthesizer};
//!
//! let synth = TerraformJsonSynthesizer::new("cdktf.out");
//! let generation = generate(Path::new("config.json"), &synth).unwrap();
//! println!("Generated {}", generation.output.artifact.display());
//! ```

pub mod declaration;
pub mod error;
pub mod generator;
pub mod mapper;
pub mod mock;
pub mod provider;
pub mod synth;
pub mod terraform;

pub use declaration::{
    OutputBinding, Reference, ResourceDeclaration, ResourceId, StackDeclaration, StackIdentity,
    Value,
};
pub use error::{IacError, IacResult};
pub use generator::{generate, generate_from, Generation};
pub use mapper::{StackMapper, MANAGED_BY};
pub use mock::RecordingSynthesizer;
pub use provider::ProviderDeclaration;
pub use synth::{SynthesisOutput, Synthesizer};
pub use terraform::{render, TerraformJsonSynthesizer, ARTIFACT_FILE, DEFAULT_OUT_DIR};
