// ABOUTME: Execution mode and action selection for an orchestration run.
// ABOUTME: Sequential trades total time for blast radius; batched does the opposite.

use std::fmt;

/// How actions are issued across the instances of a deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One instance at a time: act, wait until it leaves Ready, wait until it returns.
    #[default]
    Sequential,

    /// Act on every instance at once, then wait for any to leave Ready and for all
    /// to return. Nothing runs in parallel; only the waiting is aggregated.
    Batched,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => write!(f, "sequential"),
            ExecutionMode::Batched => write!(f, "batched"),
        }
    }
}

/// Disruptive action applied to an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Reset the instance to its base image, discarding local state.
    Reimage,
    Reboot,
}

impl Action {
    /// Verb used on progress lines.
    pub fn progressive(&self) -> &'static str {
        match self {
            Action::Reimage => "Reimaging",
            Action::Reboot => "Rebooting",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Reimage => write!(f, "reimage"),
            Action::Reboot => write!(f, "reboot"),
        }
    }
}
