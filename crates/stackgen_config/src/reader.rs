//! Configuration file reading.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::models::PlatformConfig;
use crate::validator::ConfigValidator;

/// Reader for the platform configuration document.
pub struct ConfigReader;

impl ConfigReader {
    /// Read, decode and validate the configuration at `path`.
    pub fn read_file(path: impl AsRef<Path>) -> ConfigResult<PlatformConfig> {
        let path = path.as_ref();
        let config = Self::read_unvalidated(path)?;
        Self::check(path, config)
    }

    /// Read and decode without applying validation rules.
    ///
    /// Structural problems (missing or unknown fields, wrong types) are still
    /// parse errors; empty values are left for [`ConfigValidator`] to report.
    pub fn read_unvalidated(path: impl AsRef<Path>) -> ConfigResult<PlatformConfig> {
        let path = path.as_ref();
        debug!("Reading configuration from {:?}", path);

        // Raw bytes: content that is not UTF-8 is a decode problem, not an I/O one.
        let content = fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::decode(path, &content)
    }

    /// Decode and validate configuration content that did not come from a file.
    pub fn parse(content: &str) -> ConfigResult<PlatformConfig> {
        Self::parse_from(Path::new("<inline>"), content)
    }

    fn parse_from(path: &Path, content: &str) -> ConfigResult<PlatformConfig> {
        let config = Self::decode(path, content.as_bytes())?;
        Self::check(path, config)
    }

    fn decode(path: &Path, content: &[u8]) -> ConfigResult<PlatformConfig> {
        serde_json::from_slice(content).map_err(|e| ConfigError::parse(path, e.to_string()))
    }

    fn check(path: &Path, config: PlatformConfig) -> ConfigResult<PlatformConfig> {
        let result = ConfigValidator::validate(&config);
        for warning in &result.warnings {
            warn!("{}", warning);
        }
        if !result.valid {
            return Err(ConfigError::parse(path, result.errors.join("; ")));
        }

        debug!(
            "Loaded configuration for project {} ({})",
            config.project, config.environment
        );
        Ok(config)
    }
}
