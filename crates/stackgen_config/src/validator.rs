//! Configuration validation.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::PlatformConfig;

const REGION_PATTERN: &str = r"^[a-z]{2}(-gov|-iso[a-z]?)?-[a-z]+-\d+$";
const BUCKET_NAME_PATTERN: &str = r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$";

/// Characters that would split a stack name into several path components.
const PATH_SEPARATORS: [char; 3] = ['/', '\\', '\0'];

static REGION_RE: OnceLock<Regex> = OnceLock::new();
static BUCKET_NAME_RE: OnceLock<Regex> = OnceLock::new();

/// Validation result with details.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Validator for the platform configuration.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a decoded configuration.
    ///
    /// Empty string fields are errors. A region or derived bucket name that
    /// does not look like something AWS would accept is only a warning; the
    /// provisioning tool has the final say.
    pub fn validate(config: &PlatformConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.merge(Self::validate_required(config));
        if result.valid {
            result.merge(Self::validate_region(&config.region));
            result.merge(Self::validate_bucket_name(
                &config.qualified_name(&config.storage.bucket_name),
            ));
        }

        result
    }

    /// Check that every string field is present and non-empty, and that the
    /// fields forming the stack name stay a single path component.
    pub fn validate_required(config: &PlatformConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        let fields = [
            ("project", &config.project),
            ("environment", &config.environment),
            ("region", &config.region),
            ("storage.bucket_name", &config.storage.bucket_name),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                result.add_error(format!("Field '{}' cannot be empty", name));
            }
        }

        // Both end up in the stack name, which names the output directory.
        let path_fields = [
            ("project", &config.project),
            ("environment", &config.environment),
        ];
        for (name, value) in path_fields {
            if value.contains(PATH_SEPARATORS) {
                result.add_error(format!(
                    "Field '{}' cannot contain path separators: '{}'",
                    name, value
                ));
            }
        }

        result
    }

    pub fn validate_region(region: &str) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !pattern(&REGION_RE, REGION_PATTERN).is_match(region) {
            result.add_warning(format!(
                "Region '{}' does not look like an AWS region identifier",
                region
            ));
        }

        result
    }

    /// Check the fully qualified bucket name against S3 naming rules.
    pub fn validate_bucket_name(bucket: &str) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !pattern(&BUCKET_NAME_RE, BUCKET_NAME_PATTERN).is_match(bucket) || bucket.contains("..") {
            result.add_warning(format!(
                "Bucket name '{}' does not follow S3 naming rules (3-63 lowercase letters, digits, '-' or '.')",
                bucket
            ));
        }

        result
    }
}

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("validation patterns are valid regexes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StorageConfig;

    fn config(project: &str, environment: &str, region: &str, bucket: &str) -> PlatformConfig {
        PlatformConfig::new(project, environment, region, StorageConfig::new(bucket, false))
    }

    #[test]
    fn test_validate_valid_config() {
        let result = ConfigValidator::validate(&config("my-app", "dev", "us-west-2", "data"));
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_empty_fields() {
        let result = ConfigValidator::validate(&config("", " ", "us-west-2", ""));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors.iter().any(|e| e.contains("storage.bucket_name")));
    }

    #[test]
    fn test_validate_rejects_path_separators() {
        let result = ConfigValidator::validate(&config("../../escaped", "dev", "us-west-2", "data"));
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("'project'")));

        let result = ConfigValidator::validate(&config("my-app", "dev\\prod", "us-west-2", "data"));
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("'environment'")));
    }

    #[test]
    fn test_validate_allows_dots_in_names() {
        let result = ConfigValidator::validate(&config("my.app", "dev", "us-west-2", "data"));
        assert!(result.valid);
    }

    #[test]
    fn test_patterns_compile() {
        assert!(pattern(&REGION_RE, REGION_PATTERN).is_match("us-west-2"));
        assert!(pattern(&BUCKET_NAME_RE, BUCKET_NAME_PATTERN).is_match("my-app-dev-data"));
    }

    #[test]
    fn test_validate_region_warning() {
        let result = ConfigValidator::validate(&config("my-app", "dev", "mars-central", "data"));
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_validate_gov_region() {
        let result = ConfigValidator::validate_region("us-gov-east-1");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_bucket_name_warning() {
        let result = ConfigValidator::validate(&config("MyApp", "dev", "eu-west-1", "Data_Store"));
        assert!(result.valid);
        assert!(result.warnings.iter().any(|w| w.contains("MyApp-dev-Data_Store")));
    }

    #[test]
    fn test_validate_bucket_name_length() {
        let long = "a".repeat(64);
        assert!(!ConfigValidator::validate_bucket_name(&long).warnings.is_empty());
        assert!(ConfigValidator::validate_bucket_name("abc").warnings.is_empty());
        assert!(!ConfigValidator::validate_bucket_name("ab").warnings.is_empty());
    }
}
