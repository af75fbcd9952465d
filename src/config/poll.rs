// ABOUTME: Poll cadence settings for the wait engine.
// ABOUTME: Fixed interval before every check and a bounded number of checks.

use serde::Deserialize;
use std::time::Duration;

use crate::wait::PollPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl PollSettings {
    pub fn policy(&self) -> PollPolicy {
        PollPolicy::new(self.interval, self.max_attempts)
    }
}

fn default_interval() -> Duration {
    PollPolicy::DEFAULT_INTERVAL
}

fn default_max_attempts() -> u32 {
    PollPolicy::DEFAULT_MAX_ATTEMPTS
}
