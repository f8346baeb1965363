//! Terraform JSON synthesis.
//!
//! Writes one `cdk.tf.json` per stack under `<out_dir>/stacks/<stack>/` and a
//! `manifest.json` at the root of `out_dir` listing every synthesized stack.
//! The artifact is consumed unchanged by `terraform init` / `terraform apply`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde_json::{json, Map, Value as JsonValue};
use tracing::{debug, info, warn};

use crate::declaration::StackDeclaration;
use crate::error::{IacError, IacResult};
use crate::mapper::MANAGED_BY;
use crate::synth::{SynthesisOutput, Synthesizer};

/// Default root directory for synthesized stacks.
pub const DEFAULT_OUT_DIR: &str = "cdktf.out";
/// File name of the per-stack artifact.
pub const ARTIFACT_FILE: &str = "cdk.tf.json";
pub const MANIFEST_FILE: &str = "manifest.json";

const STACKS_DIR: &str = "stacks";

/// Render a stack to the Terraform JSON document.
pub fn render(stack: &StackDeclaration) -> JsonValue {
    let provider = &stack.provider;

    let mut resources = Map::new();
    for resource in &stack.resources {
        let attributes: Map<String, JsonValue> = resource
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();

        if let JsonValue::Object(by_name) = resources
            .entry(resource.id.resource_type.clone())
            .or_insert_with(|| JsonValue::Object(Map::new()))
        {
            by_name.insert(resource.id.name.clone(), JsonValue::Object(attributes));
        }
    }

    let outputs: Map<String, JsonValue> = stack
        .outputs
        .iter()
        .map(|o| {
            (
                o.name.clone(),
                json!({ "value": o.value.to_json(), "description": o.description }),
            )
        })
        .collect();

    json!({
        "//": {
            "metadata": {
                "generator": MANAGED_BY,
                "version": env!("CARGO_PKG_VERSION"),
                "stackName": stack.identity.as_str(),
                "backend": "local"
            }
        },
        "terraform": {
            "required_providers": {
                provider.name.clone(): {
                    "source": provider.source,
                    "version": provider.version
                }
            },
            "backend": {
                "local": { "path": format!("terraform.{}.tfstate", stack.identity) }
            }
        },
        "provider": {
            provider.name.clone(): [ { "region": provider.region } ]
        },
        "resource": resources,
        "output": outputs
    })
}

/// Synthesizer writing Terraform JSON to the local filesystem.
pub struct TerraformJsonSynthesizer {
    out_dir: PathBuf,
}

impl TerraformJsonSynthesizer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Directory a stack is synthesized into.
    ///
    /// The stack name must be a single plain path component so the artifact
    /// always lands inside `<out_dir>/stacks`.
    pub fn stack_dir(&self, stack: &StackDeclaration) -> IacResult<PathBuf> {
        let name = stack.identity.as_str();
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == name && !name.contains('\\') => {
                Ok(self.out_dir.join(STACKS_DIR).join(name))
            }
            _ => Err(IacError::SynthesisFailed(format!(
                "Stack name '{}' is not a valid directory name",
                name
            ))),
        }
    }

    fn write_json(path: &Path, value: &JsonValue) -> IacResult<()> {
        let content = serde_json::to_string_pretty(value)?;
        fs::write(path, content)
            .map_err(|e| IacError::SynthesisFailed(format!("Failed to write {:?}: {}", path, e)))
    }

    /// Add the stack to the manifest, keeping entries for other stacks.
    fn update_manifest(&self, stack: &StackDeclaration) -> IacResult<()> {
        let path = self.out_dir.join(MANIFEST_FILE);

        let mut stacks = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<JsonValue>(&content) {
                Ok(JsonValue::Object(mut manifest)) => match manifest.remove("stacks") {
                    Some(JsonValue::Object(stacks)) => stacks,
                    None => Map::new(),
                    Some(other) => {
                        warn!(
                            "Ignoring malformed stack list in manifest {:?}: {}",
                            path, other
                        );
                        Map::new()
                    }
                },
                _ => {
                    warn!("Ignoring unreadable manifest at {:?}", path);
                    Map::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(IacError::Io(e)),
        };

        let name = stack.identity.as_str();
        let working_dir = format!("{}/{}", STACKS_DIR, name);
        stacks.insert(
            name.to_string(),
            json!({
                "name": name,
                "workingDirectory": working_dir,
                "synthesizedStackPath": format!("{}/{}", working_dir, ARTIFACT_FILE)
            }),
        );

        let manifest = json!({
            "version": env!("CARGO_PKG_VERSION"),
            "stacks": stacks
        });
        Self::write_json(&path, &manifest)?;
        debug!("Updated manifest {:?}", path);
        Ok(())
    }
}

impl Default for TerraformJsonSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_OUT_DIR)
    }
}

impl Synthesizer for TerraformJsonSynthesizer {
    fn synthesize(&self, stack: &StackDeclaration) -> IacResult<SynthesisOutput> {
        let stack_dir = self.stack_dir(stack)?;
        info!("Synthesizing stack {} to {:?}", stack.identity, stack_dir);

        let document = render(stack);

        fs::create_dir_all(&stack_dir)?;
        let artifact = stack_dir.join(ARTIFACT_FILE);
        Self::write_json(&artifact, &document)?;
        self.update_manifest(stack)?;

        info!(
            "Synthesized {} resources and {} outputs",
            stack.resources.len(),
            stack.outputs.len()
        );
        Ok(SynthesisOutput::new(stack.identity.clone(), stack_dir, artifact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::StackIdentity;
    use crate::mapper::StackMapper;
    use stackgen_config::{PlatformConfig, StorageConfig};
    use tempfile::tempdir;

    fn stack(enable_versioning: bool) -> StackDeclaration {
        StackMapper::map(&PlatformConfig::new(
            "my-app",
            "dev",
            "us-west-2",
            StorageConfig::new("data", enable_versioning),
        ))
    }

    #[test]
    fn test_render_resources() {
        let doc = render(&stack(true));

        assert_eq!(doc["resource"]["aws_s3_bucket"]["bucket"]["bucket"], "my-app-dev-data");
        assert_eq!(
            doc["resource"]["aws_s3_bucket"]["bucket"]["tags"]["ManagedBy"],
            MANAGED_BY
        );
        assert_eq!(
            doc["resource"]["aws_s3_bucket_versioning"]["versioning"]["bucket"],
            "${aws_s3_bucket.bucket.bucket}"
        );
        assert_eq!(
            doc["resource"]["aws_s3_bucket_versioning"]["versioning"]["versioning_configuration"]["status"],
            "Enabled"
        );
    }

    #[test]
    fn test_render_without_versioning() {
        let doc = render(&stack(false));
        assert!(doc["resource"].get("aws_s3_bucket_versioning").is_none());
    }

    #[test]
    fn test_render_provider_and_backend() {
        let doc = render(&stack(false));
        assert_eq!(doc["provider"]["aws"][0]["region"], "us-west-2");
        assert_eq!(doc["terraform"]["required_providers"]["aws"]["source"], "hashicorp/aws");
        assert_eq!(
            doc["terraform"]["backend"]["local"]["path"],
            "terraform.my-app-dev-stack.tfstate"
        );
    }

    #[test]
    fn test_render_outputs() {
        let doc = render(&stack(false));
        assert_eq!(doc["output"]["bucket_arn"]["value"], "${aws_s3_bucket.bucket.arn}");
        assert_eq!(
            doc["output"]["bucket_name"]["description"],
            "The name of the created S3 bucket"
        );
    }

    #[test]
    fn test_synthesize_writes_artifact() {
        let dir = tempdir().unwrap();
        let synth = TerraformJsonSynthesizer::new(dir.path().join("cdktf.out"));

        let output = synth.synthesize(&stack(true)).unwrap();

        assert_eq!(
            output.artifact,
            dir.path().join("cdktf.out/stacks/my-app-dev-stack/cdk.tf.json")
        );
        let written: JsonValue =
            serde_json::from_str(&fs::read_to_string(&output.artifact).unwrap()).unwrap();
        assert_eq!(written, render(&stack(true)));
    }

    #[test]
    fn test_manifest_keeps_other_stacks() {
        let dir = tempdir().unwrap();
        let synth = TerraformJsonSynthesizer::new(dir.path());

        let dev = stack(true);
        let prod = StackMapper::map(&PlatformConfig::new(
            "my-app",
            "prod",
            "us-west-2",
            StorageConfig::new("data", true),
        ));
        synth.synthesize(&dev).unwrap();
        synth.synthesize(&prod).unwrap();

        let manifest: JsonValue =
            serde_json::from_str(&fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap())
                .unwrap();
        let stacks = manifest["stacks"].as_object().unwrap();
        assert_eq!(stacks.len(), 2);
        assert_eq!(
            stacks["my-app-prod-stack"]["synthesizedStackPath"],
            "stacks/my-app-prod-stack/cdk.tf.json"
        );
    }

    #[test]
    fn test_synthesize_rejects_stack_name_outside_out_dir() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested/cdktf.out");
        let synth = TerraformJsonSynthesizer::new(&out);

        let mut escaping = stack(false);
        escaping.identity = StackIdentity::new("../../escaped-dev-stack");

        let err = synth.synthesize(&escaping).unwrap_err();
        assert!(matches!(err, IacError::SynthesisFailed(_)));
        assert!(!dir.path().join("nested/escaped-dev-stack").exists());
        assert!(!out.join(MANIFEST_FILE).exists());

        for name in ["a/b-stack", "..", "", "/tmp/abs-stack", "a\\b-stack"] {
            escaping.identity = StackIdentity::new(name);
            assert!(synth.stack_dir(&escaping).is_err(), "accepted {:?}", name);
        }
    }

    #[test]
    fn test_stack_dir_for_plain_name() {
        let synth = TerraformJsonSynthesizer::new("out");
        assert_eq!(
            synth.stack_dir(&stack(false)).unwrap(),
            PathBuf::from("out/stacks/my-app-dev-stack")
        );
    }

    #[test]
    fn test_manifest_with_malformed_stack_list_is_replaced() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"version":"0.0.0","stacks":"not-a-map"}"#,
        )
        .unwrap();
        let synth = TerraformJsonSynthesizer::new(dir.path());

        synth.synthesize(&stack(false)).unwrap();

        let manifest: JsonValue =
            serde_json::from_str(&fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap())
                .unwrap();
        let stacks = manifest["stacks"].as_object().unwrap();
        assert_eq!(stacks.len(), 1);
        assert!(stacks.contains_key("my-app-dev-stack"));
    }

    #[test]
    fn test_manifest_read_failure_is_error() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(MANIFEST_FILE)).unwrap();
        let synth = TerraformJsonSynthesizer::new(dir.path());

        let err = synth.synthesize(&stack(false)).unwrap_err();
        assert!(matches!(err, IacError::Io(_)));
    }

    #[test]
    fn test_synthesize_fails_when_out_dir_is_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();

        let synth = TerraformJsonSynthesizer::new(&blocker);
        assert!(synth.synthesize(&stack(false)).is_err());
    }
}
