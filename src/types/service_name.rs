// ABOUTME: Hosted service name validation.
// ABOUTME: Ensures service names are usable as a DNS label and a URL path segment.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceNameError {
    #[error("service name cannot be empty")]
    Empty,

    #[error("service name exceeds maximum length of 63 characters")]
    TooLong,

    #[error("service name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("service name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("invalid character in service name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(value: &str) -> Result<Self, ServiceNameError> {
        if value.is_empty() {
            return Err(ServiceNameError::Empty);
        }

        if value.len() > 63 {
            return Err(ServiceNameError::TooLong);
        }

        if value.starts_with('-') {
            return Err(ServiceNameError::StartsWithHyphen);
        }

        if value.ends_with('-') {
            return Err(ServiceNameError::EndsWithHyphen);
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '-')
        {
            return Err(ServiceNameError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ServiceName {
    type Err = ServiceNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
