//! Declaration model: stacks, resources, outputs and attribute values.
//!
//! Declarations are plain data. They are built once by the mapper and handed
//! to a synthesizer without further mutation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::provider::ProviderDeclaration;

/// Unique identifier for a resource within a stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResourceId {
    /// Provider resource type (e.g., "aws_s3_bucket")
    pub resource_type: String,
    /// Logical name inside the stack (e.g., "bucket")
    pub name: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// Reference an attribute of this resource.
    pub fn attribute(&self, attribute: impl Into<String>) -> Reference {
        Reference {
            resource: self.clone(),
            attribute: attribute.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource_type, self.name)
    }
}

/// Reference to an attribute another resource exposes once provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub resource: ResourceId,
    pub attribute: String,
}

impl Reference {
    /// Terraform interpolation form, e.g. `${aws_s3_bucket.bucket.arn}`.
    pub fn interpolation(&self) -> String {
        format!("${{{}.{}}}", self.resource, self.attribute)
    }
}

/// Attribute value of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    /// Nested block or string map (tags)
    Map(BTreeMap<String, Value>),
    Reference(Reference),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// Convert to the JSON form consumed by the provisioning tool.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Reference(r) => serde_json::Value::String(r.interpolation()),
        }
    }
}

impl From<Reference> for Value {
    fn from(reference: Reference) -> Self {
        Value::Reference(reference)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Desired state of one infrastructure object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceDeclaration {
    pub id: ResourceId,
    pub attributes: BTreeMap<String, Value>,
}

impl ResourceDeclaration {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(resource_type, name),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Reference one of this resource's attributes.
    pub fn reference(&self, attribute: impl Into<String>) -> Reference {
        self.id.attribute(attribute)
    }
}

/// Value exposed by the stack after provisioning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputBinding {
    pub name: String,
    pub value: Value,
    pub description: String,
}

impl OutputBinding {
    pub fn new(name: impl Into<String>, value: Value, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            description: description.into(),
        }
    }
}

/// Name of a deployable stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StackIdentity(String);

impl StackIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StackIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Complete declaration set for one stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackDeclaration {
    pub identity: StackIdentity,
    pub provider: ProviderDeclaration,
    pub resources: Vec<ResourceDeclaration>,
    pub outputs: Vec<OutputBinding>,
}

impl StackDeclaration {
    pub fn new(identity: StackIdentity, provider: ProviderDeclaration) -> Self {
        Self {
            identity,
            provider,
            resources: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn resource(&self, id: &ResourceId) -> Option<&ResourceDeclaration> {
        self.resources.iter().find(|r| &r.id == id)
    }

    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = &'a ResourceDeclaration> + 'a {
        self.resources
            .iter()
            .filter(move |r| r.id.resource_type == resource_type)
    }

    pub fn output(&self, name: &str) -> Option<&OutputBinding> {
        self.outputs.iter().find(|o| o.name == name)
    }
}
