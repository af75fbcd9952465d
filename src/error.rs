// ABOUTME: Application-wide error types for reimager.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::client::{ClientError, CredentialsError};
use crate::orchestrate::OperationError;
use crate::types::{InstanceNameError, ServiceNameError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// True for failures caused by what the operator typed, which warrant a usage hint.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

impl From<CredentialsError> for Error {
    fn from(err: CredentialsError) -> Self {
        Error::InvalidArgument(err.to_string())
    }
}

impl From<ServiceNameError> for Error {
    fn from(err: ServiceNameError) -> Self {
        Error::InvalidArgument(err.to_string())
    }
}

impl From<InstanceNameError> for Error {
    fn from(err: InstanceNameError) -> Self {
        Error::InvalidArgument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
