// ABOUTME: Error types for readiness waits.
// ABOUTME: Timeout, not-found, cancellation, and transport failures.

use crate::client::ClientError;
use crate::types::Readiness;

use super::target::Target;

/// Why a wait ended without its condition holding.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    /// The condition never held within the attempt budget.
    #[error("timed out after {attempts} polls waiting for {target} to be {want}")]
    Timeout {
        target: Target,
        want: Readiness,
        attempts: u32,
    },

    /// The target instance, or the whole roster, was absent from a snapshot.
    #[error("{}", describe_missing(.target))]
    NotFound { target: Target },

    /// The run was cancelled between polls.
    #[error("wait for {target} cancelled")]
    Cancelled { target: Target },

    /// The snapshot query itself failed.
    #[error("failed to query deployment: {0}")]
    Client(#[source] ClientError),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitErrorKind {
    Timeout,
    NotFound,
    Cancelled,
    Transport,
}

impl WaitError {
    pub fn kind(&self) -> WaitErrorKind {
        match self {
            WaitError::Timeout { .. } => WaitErrorKind::Timeout,
            WaitError::NotFound { .. } => WaitErrorKind::NotFound,
            WaitError::Cancelled { .. } => WaitErrorKind::Cancelled,
            WaitError::Client(_) => WaitErrorKind::Transport,
        }
    }
}

fn describe_missing(target: &Target) -> String {
    match target {
        Target::Instance(name) => format!("instance {name} not found in deployment"),
        Target::Any | Target::All => "deployment has no instances".to_string(),
    }
}
