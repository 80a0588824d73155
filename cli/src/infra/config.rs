//! Infrastructure implementation of the `ConfigStore` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::{CONFIG_FILE_NAME, ProjectConfig, validate_config};
use crate::domain::error::ConfigError;

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV: &str = "SIMDRIVE_CONFIG";

/// Production implementation of `ConfigStore` that reads a YAML file on disk.
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self, project_root: &Path) -> Result<ProjectConfig> {
        let path = self.path(project_root);
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config: ProjectConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        validate_config(&config).with_context(|| format!("invalid {}", path.display()))?;
        Ok(config)
    }

    fn path(&self, project_root: &Path) -> PathBuf {
        match std::env::var_os(CONFIG_ENV) {
            Some(val) if !val.is_empty() => PathBuf::from(val),
            _ => project_root.join(CONFIG_FILE_NAME),
        }
    }
}
