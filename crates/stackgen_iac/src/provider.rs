//! Cloud provider declaration.

use serde::Serialize;

/// Terraform provider name for AWS.
pub const AWS_PROVIDER: &str = "aws";
/// Registry source of the AWS provider.
pub const AWS_PROVIDER_SOURCE: &str = "hashicorp/aws";
/// Version constraint for the AWS provider.
pub const AWS_PROVIDER_VERSION: &str = "~> 5.0";

/// Provider a stack's resources are provisioned through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderDeclaration {
    pub name: String,
    pub source: String,
    pub version: String,
    pub region: String,
}

impl ProviderDeclaration {
    /// AWS provider bound to `region`.
    pub fn aws(region: impl Into<String>) -> Self {
        Self {
            name: AWS_PROVIDER.to_string(),
            source: AWS_PROVIDER_SOURCE.to_string(),
            version: AWS_PROVIDER_VERSION.to_string(),
            region: region.into(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}
