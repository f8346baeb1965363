//! Data models for the platform configuration.

use serde::{Deserialize, Serialize};

/// Conventional location of the configuration document.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Separator used when joining configuration values into resource names.
pub const NAME_SEPARATOR: &str = "-";

/// Root configuration written by the developer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformConfig {
    pub project: String,
    pub environment: String,
    /// Cloud provider region identifier, e.g. `us-west-2`.
    pub region: String,
    pub storage: StorageConfig,
}

/// Storage bucket settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Short bucket name, qualified with project and environment on use.
    pub bucket_name: String,
    pub enable_versioning: bool,
}

impl PlatformConfig {
    pub fn new(
        project: impl Into<String>,
        environment: impl Into<String>,
        region: impl Into<String>,
        storage: StorageConfig,
    ) -> Self {
        Self {
            project: project.into(),
            environment: environment.into(),
            region: region.into(),
            storage,
        }
    }

    /// Prefix `suffix` with the project and environment: `{project}-{environment}-{suffix}`.
    pub fn qualified_name(&self, suffix: &str) -> String {
        [self.project.as_str(), self.environment.as_str(), suffix].join(NAME_SEPARATOR)
    }
}

impl StorageConfig {
    pub fn new(bucket_name: impl Into<String>, enable_versioning: bool) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            enable_versioning,
        }
    }
}
