use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::env::{ActionEnv, input_key};
use crate::error::{ActionError, Result};

/// `action.yml`: the inputs and outputs a step declares to the runner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub inputs: BTreeMap<String, InputSpec>,
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs: Option<Runs>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSpec {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSpec {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runs {
    pub using: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ActionMetadata {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ActionError::Metadata(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let meta: Self = serde_yaml::from_str(content)?;
        if meta.name.trim().is_empty() {
            return Err(ActionError::Metadata("missing 'name'".into()));
        }
        Ok(meta)
    }

    pub fn declares_input(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    /// Fills `INPUT_*` for declared inputs that have a default and are not
    /// already set, as the hosted runner does before starting a step.
    pub fn apply_defaults(&self, env: &mut ActionEnv) {
        for (name, spec) in &self.inputs {
            let Some(default) = &spec.default else {
                continue;
            };
            let key = input_key(name);
            if !env.contains(&key) {
                tracing::debug!(input = %name, "applying metadata default");
                env.set(key, default.clone());
            }
        }
    }

    /// Inputs as rows for `output::render`.
    pub fn inputs_value(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.inputs
                .iter()
                .map(|(name, spec)| {
                    serde_json::json!({
                        "name": name,
                        "description": spec.description,
                        "required": spec.required,
                        "default": spec.default,
                        "deprecation_message": spec.deprecation_message,
                    })
                })
                .collect(),
        )
    }

    pub fn outputs_value(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.outputs
                .iter()
                .map(|(name, spec)| {
                    serde_json::json!({ "name": name, "description": spec.description })
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTION_YML: &str = r#"
name: Hello World
description: Greet someone and record the time
inputs:
  name:
    description: Who to greet
    required: true
    default: World
  shout:
    description: Upper-case the greeting
    deprecationMessage: no longer used
outputs:
  time:
    description: The time we greeted you
runs:
  using: docker
  image: Dockerfile
"#;

    #[test]
    fn parses_inputs_and_outputs() {
        let meta = ActionMetadata::parse(ACTION_YML).unwrap();
        assert_eq!(meta.name, "Hello World");
        assert!(meta.declares_input("name"));
        assert!(!meta.declares_input("time"));
        assert!(meta.inputs["name"].required);
        assert_eq!(meta.inputs["name"].default.as_deref(), Some("World"));
        assert_eq!(
            meta.inputs["shout"].deprecation_message.as_deref(),
            Some("no longer used")
        );
        assert_eq!(meta.outputs["time"].description, "The time we greeted you");
        assert_eq!(meta.runs.unwrap().using, "docker");
    }

    #[test]
    fn docker_image_survives_re_rendering() {
        let meta = ActionMetadata::load(Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/action.yml"
        )))
        .unwrap();
        let runs = meta.runs.as_ref().unwrap();
        assert_eq!(runs.using, "docker");
        assert_eq!(runs.image.as_deref(), Some("Dockerfile"));

        let rendered = serde_yaml::to_string(&meta).unwrap();
        let reparsed = ActionMetadata::parse(&rendered).unwrap();
        assert_eq!(reparsed.runs.unwrap().image.as_deref(), Some("Dockerfile"));
    }

    #[test]
    fn rejects_nameless_metadata() {
        let err = ActionMetadata::parse("description: x\n").unwrap_err();
        assert!(matches!(err, ActionError::Yaml(_) | ActionError::Metadata(_)));
    }

    #[test]
    fn defaults_fill_only_unset_inputs() {
        let meta = ActionMetadata::parse(ACTION_YML).unwrap();
        let mut env = ActionEnv::default();
        meta.apply_defaults(&mut env);
        assert_eq!(env.get("INPUT_NAME"), Some("World"));
        assert_eq!(env.get("INPUT_SHOUT"), None);

        let mut env = ActionEnv::from_pairs([("INPUT_NAME", "Octocat")]);
        meta.apply_defaults(&mut env);
        assert_eq!(env.get("INPUT_NAME"), Some("Octocat"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("action.yml");
        std::fs::write(&path, ACTION_YML).unwrap();
        let meta = ActionMetadata::load(&path).unwrap();
        assert_eq!(meta.inputs_value().as_array().unwrap().len(), 2);
        assert_eq!(meta.outputs_value()[0]["name"], "time");

        let err = ActionMetadata::load(&dir.path().join("missing.yml")).unwrap_err();
        assert!(err.to_string().starts_with("Invalid action metadata: cannot read"));
    }
}
