//! # stackgen_config
//!
//! Reading and validation of the developer-authored platform configuration.
//!
//! The configuration is a small JSON document describing one project, one
//! environment, the target region and a storage bucket:
//!
//! ```json
//! {
//!   "project": "my-app",
//!   "environment": "dev",
//!   "region": "us-west-2",
//!   "storage": { "bucket_name": "data", "enable_versioning": true }
//! }
//! ```
//!
//! Decoding is strict: every field is required, unknown fields are rejected
//! and string fields must not be empty.
//!
//! ## Example
//!
//! ```rust,no_run
//! use stackgen_config::ConfigReader;
//!
//! let config = ConfigReader::read_file("config.json").unwrap();
//! println!("{} ({})", config.project, config.environment);
//! ```

pub mod error;
pub mod models;
pub mod reader;
pub mod validator;

pub use error::{ConfigError, ConfigResult};
pub use models::{PlatformConfig, StorageConfig, DEFAULT_CONFIG_FILE};
pub use reader::ConfigReader;
pub use validator::{ConfigValidator, ValidationResult};
