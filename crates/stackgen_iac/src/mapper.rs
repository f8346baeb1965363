//! Mapping from platform configuration to stack declarations.

use std::collections::BTreeMap;

use tracing::debug;

use stackgen_config::PlatformConfig;

use crate::declaration::{
    OutputBinding, ResourceDeclaration, StackDeclaration, StackIdentity, Value,
};
use crate::provider::ProviderDeclaration;

/// Marker recorded in the `ManagedBy` tag on the bucket.
pub const MANAGED_BY: &str = "stackgen";

pub const BUCKET_TYPE: &str = "aws_s3_bucket";
pub const BUCKET_NAME: &str = "bucket";
pub const VERSIONING_TYPE: &str = "aws_s3_bucket_versioning";
pub const VERSIONING_NAME: &str = "versioning";
pub const VERSIONING_ENABLED: &str = "Enabled";

const STACK_SUFFIX: &str = "stack";

/// Derives the declaration set for a configuration.
pub struct StackMapper;

impl StackMapper {
    /// Build the full stack declaration.
    ///
    /// The configuration is expected to have passed validation; the mapping
    /// itself cannot fail.
    pub fn map(config: &PlatformConfig) -> StackDeclaration {
        let identity = Self::stack_identity(config);
        let mut stack = StackDeclaration::new(identity, ProviderDeclaration::aws(&config.region));

        let bucket = Self::bucket(config);
        let versioning = config
            .storage
            .enable_versioning
            .then(|| Self::versioning(&bucket));

        stack.outputs = Self::outputs(&bucket);
        stack.resources.push(bucket);
        stack.resources.extend(versioning);

        debug!(
            "Mapped stack {} with {} resources and {} outputs",
            stack.identity,
            stack.resources.len(),
            stack.outputs.len()
        );
        stack
    }

    /// `{project}-{environment}-stack`
    pub fn stack_identity(config: &PlatformConfig) -> StackIdentity {
        StackIdentity::new(config.qualified_name(STACK_SUFFIX))
    }

    /// `{project}-{environment}-{bucket_name}`. Uniqueness is by convention only.
    pub fn bucket_name(config: &PlatformConfig) -> String {
        config.qualified_name(&config.storage.bucket_name)
    }

    pub fn bucket_tags(config: &PlatformConfig) -> BTreeMap<String, Value> {
        let mut tags = BTreeMap::new();
        tags.insert("Project".to_string(), Value::string(&config.project));
        tags.insert("Environment".to_string(), Value::string(&config.environment));
        tags.insert("ManagedBy".to_string(), Value::string(MANAGED_BY));
        tags
    }

    fn bucket(config: &PlatformConfig) -> ResourceDeclaration {
        ResourceDeclaration::new(BUCKET_TYPE, BUCKET_NAME)
            .with_attribute("bucket", Value::string(Self::bucket_name(config)))
            .with_attribute("tags", Value::Map(Self::bucket_tags(config)))
    }

    fn versioning(bucket: &ResourceDeclaration) -> ResourceDeclaration {
        let mut configuration = BTreeMap::new();
        configuration.insert("status".to_string(), Value::string(VERSIONING_ENABLED));

        ResourceDeclaration::new(VERSIONING_TYPE, VERSIONING_NAME)
            .with_attribute("bucket", bucket.reference("bucket").into())
            .with_attribute("versioning_configuration", Value::Map(configuration))
    }

    fn outputs(bucket: &ResourceDeclaration) -> Vec<OutputBinding> {
        vec![
            OutputBinding::new(
                "bucket_name",
                bucket.reference("bucket").into(),
                "The name of the created S3 bucket",
            ),
            OutputBinding::new(
                "bucket_arn",
                bucket.reference("arn").into(),
                "The ARN of the created S3 bucket",
            ),
        ]
    }
}
