// ABOUTME: Deployment slot selector for a hosted service.
// ABOUTME: Passed through unchanged on every snapshot query and action.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentSlot {
    #[default]
    Production,
    Staging,
}

impl DeploymentSlot {
    /// Path segment used by the management API.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentSlot::Production => "production",
            DeploymentSlot::Staging => "staging",
        }
    }
}

impl fmt::Display for DeploymentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeploymentSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" => Ok(DeploymentSlot::Production),
            "staging" => Ok(DeploymentSlot::Staging),
            other => Err(format!(
                "unknown deployment slot '{other}' (expected production or staging)"
            )),
        }
    }
}
