// ABOUTME: Management endpoint settings for the REST deployment client.
// ABOUTME: Endpoint base URL, API version header, and per-request timeout.

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://management.core.windows.net";
pub const DEFAULT_API_VERSION: &str = "2012-03-01";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManagementSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ManagementSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}
