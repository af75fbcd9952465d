// ABOUTME: Optional settings file for reimager (reimager.yml).
// ABOUTME: Handles YAML parsing, discovery, and validation; absent file means defaults.

mod management;
mod poll;

pub use management::{DEFAULT_API_VERSION, DEFAULT_ENDPOINT, ManagementSettings};
pub use poll::PollSettings;

use crate::error::{Error, Result};
use crate::types::DeploymentSlot;
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "reimager.yml";
pub const CONFIG_FILENAME_ALT: &str = "reimager.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".reimager/config.yml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub poll: PollSettings,

    #[serde(default)]
    pub management: ManagementSettings,

    #[serde(default)]
    pub slot: DeploymentSlot,
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document is valid and means "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the first settings file found in `dir`, or defaults if there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        match candidates.iter().find(|path| path.exists()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading settings");
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.poll.max_attempts == 0 {
            return Err(Error::InvalidConfig(
                "poll.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.management.endpoint.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "management.endpoint cannot be empty".to_string(),
            ));
        }
        if self.management.api_version.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "management.api_version cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
