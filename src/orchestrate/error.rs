// ABOUTME: Error types for orchestration runs.
// ABOUTME: Wraps wait failures and action / roster transport failures.

use crate::client::ClientError;
use crate::types::{InstanceName, ServiceName};
use crate::wait::{WaitError, WaitErrorKind};

use super::mode::Action;

/// Errors that abort an orchestration run. Nothing is retried or compensated.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    /// The initial roster query failed.
    #[error("failed to read deployment of {service}: {source}")]
    Roster {
        service: ServiceName,
        source: ClientError,
    },

    /// The deployment reported no instances for a batched run.
    #[error("deployment of {service} has no instances")]
    EmptyRoster { service: ServiceName },

    /// The remote did not acknowledge an action request.
    #[error("failed to request {action} of {instance}: {source}")]
    Action {
        action: Action,
        instance: InstanceName,
        source: ClientError,
    },

    /// A readiness wait failed.
    #[error(transparent)]
    Wait(#[from] WaitError),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationErrorKind {
    Timeout,
    NotFound,
    Cancelled,
    Transport,
}

impl OperationError {
    pub fn kind(&self) -> OperationErrorKind {
        match self {
            OperationError::Roster { .. } | OperationError::Action { .. } => {
                OperationErrorKind::Transport
            }
            OperationError::EmptyRoster { .. } => OperationErrorKind::NotFound,
            OperationError::Wait(err) => match err.kind() {
                WaitErrorKind::Timeout => OperationErrorKind::Timeout,
                WaitErrorKind::NotFound => OperationErrorKind::NotFound,
                WaitErrorKind::Cancelled => OperationErrorKind::Cancelled,
                WaitErrorKind::Transport => OperationErrorKind::Transport,
            },
        }
    }
}
