// ABOUTME: Non-fatal warnings raised while planning an orchestration run.
// ABOUTME: A run that only warns still succeeds; the CLI shows each warning to the operator.

use std::fmt;

/// Warnings collected over one run, in the order they were raised.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = %warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// The deployment reported no instances, so nothing was done.
    pub fn empty_roster(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::EmptyRoster,
            message: message.into(),
        }
    }

    /// A reboot filter named an instance the deployment does not have.
    pub fn unmatched_target(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::UnmatchedTarget,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    EmptyRoster,
    UnmatchedTarget,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::EmptyRoster => write!(f, "empty roster"),
            WarningKind::UnmatchedTarget => write!(f, "unmatched target"),
        }
    }
}
