// ABOUTME: Result of a completed orchestration run.
// ABOUTME: Records what was acted on, when it finished, and any warnings.

use chrono::{DateTime, Local};

use crate::diagnostics::Diagnostics;
use crate::types::InstanceName;

use super::mode::{Action, ExecutionMode};

#[derive(Debug, Clone)]
pub struct Summary {
    pub action: Action,
    pub mode: ExecutionMode,
    /// Instances the action was requested for, in request order.
    pub instances: Vec<InstanceName>,
    pub finished_at: DateTime<Local>,
    pub diagnostics: Diagnostics,
}

impl Summary {
    pub fn is_noop(&self) -> bool {
        self.instances.is_empty()
    }
}
