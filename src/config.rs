use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ActionError, Result};

pub const KEYS: &[&str] = &["metadata", "output", "log"];

/// Local defaults for running the step outside a hosted runner.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct ActionConfig {
    pub metadata: Option<PathBuf>,
    pub output: Option<String>,
    pub log: Option<String>,
}

impl ActionConfig {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        Self::try_load_from(path).unwrap_or_else(|err| {
            tracing::warn!("{err}");
            Self::default()
        })
    }

    /// A missing file is the default configuration; an unreadable or
    /// unparsable one is an error.
    pub fn try_load() -> Result<Self> {
        Self::try_load_from(&Self::config_path())
    }

    pub fn try_load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            ActionError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| ActionError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ActionError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "metadata" => self.metadata = Some(PathBuf::from(value)),
            "output" => self.output = Some(value),
            "log" => self.log = Some(value),
            _ => {
                return Err(ActionError::Config(format!(
                    "Unknown key '{key}'. Valid keys: {}",
                    KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".greet-action")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ActionConfig::load_from(&dir.path().join("config.toml"));
        assert_eq!(cfg, ActionConfig::default());
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output = [unterminated").unwrap();
        assert_eq!(ActionConfig::load_from(&path), ActionConfig::default());
    }

    #[test]
    fn garbage_file_is_reported_by_try_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output = [unterminated").unwrap();
        let err = ActionConfig::try_load_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: failed to parse"));
        assert_eq!(
            ActionConfig::try_load_from(&dir.path().join("absent.toml")).unwrap(),
            ActionConfig::default()
        );
    }

    #[test]
    fn set_then_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = ActionConfig::default();
        cfg.set("metadata", "action.yml".into()).unwrap();
        cfg.set("log", "debug".into()).unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = ActionConfig::load_from(&path);
        assert_eq!(loaded.metadata, Some(PathBuf::from("action.yml")));
        assert_eq!(loaded.log.as_deref(), Some("debug"));
        assert_eq!(loaded.output, None);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut cfg = ActionConfig::default();
        let err = cfg.set("server", "x".into()).unwrap_err();
        assert!(err.to_string().contains("Valid keys: metadata, output, log"));
    }
}
