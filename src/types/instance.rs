// ABOUTME: Role instance identity and status as reported by the management API.
// ABOUTME: Collapses every remote status into the Ready / NotReady distinction.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstanceNameError {
    #[error("instance name cannot be empty")]
    Empty,

    #[error("instance name cannot contain whitespace")]
    ContainsWhitespace,
}

/// Name of one role instance, unique within a deployment snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceName(String);

impl InstanceName {
    pub fn new(value: impl Into<String>) -> Result<Self, InstanceNameError> {
        let value = value.into();
        if value.is_empty() {
            return Err(InstanceNameError::Empty);
        }
        if value.chars().any(char::is_whitespace) {
            return Err(InstanceNameError::ContainsWhitespace);
        }
        Ok(Self(value))
    }

    /// Parse an optional instance filter. Absent or blank means every instance.
    pub fn filter(raw: Option<&str>) -> Result<Option<Self>, InstanceNameError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => Self::new(name).map(Some),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for InstanceName {
    type Err = InstanceNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for InstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The only distinction the wait engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Readiness {
    Ready,
    NotReady,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Ready => write!(f, "ready"),
            Readiness::NotReady => write!(f, "not ready"),
        }
    }
}

/// Instance status as reported by the remote deployment.
///
/// Unknown values are preserved verbatim in `Other` so they can still be
/// reported to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceStatus {
    ReadyRole,
    BusyRole,
    CreatingRole,
    StartingRole,
    StoppingRole,
    RestartingRole,
    CyclingRole,
    StoppedVM,
    RoleStateUnknown,
    UnresponsiveRole,
    Other(String),
}

impl InstanceStatus {
    pub fn readiness(&self) -> Readiness {
        match self {
            InstanceStatus::ReadyRole => Readiness::Ready,
            _ => Readiness::NotReady,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            InstanceStatus::ReadyRole => "ReadyRole",
            InstanceStatus::BusyRole => "BusyRole",
            InstanceStatus::CreatingRole => "CreatingRole",
            InstanceStatus::StartingRole => "StartingRole",
            InstanceStatus::StoppingRole => "StoppingRole",
            InstanceStatus::RestartingRole => "RestartingRole",
            InstanceStatus::CyclingRole => "CyclingRole",
            InstanceStatus::StoppedVM => "StoppedVM",
            InstanceStatus::RoleStateUnknown => "RoleStateUnknown",
            InstanceStatus::UnresponsiveRole => "UnresponsiveRole",
            InstanceStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for InstanceStatus {
    fn from(value: &str) -> Self {
        match value {
            "ReadyRole" => InstanceStatus::ReadyRole,
            "BusyRole" => InstanceStatus::BusyRole,
            "CreatingRole" => InstanceStatus::CreatingRole,
            "StartingRole" => InstanceStatus::StartingRole,
            "StoppingRole" => InstanceStatus::StoppingRole,
            "RestartingRole" => InstanceStatus::RestartingRole,
            "CyclingRole" => InstanceStatus::CyclingRole,
            "StoppedVM" => InstanceStatus::StoppedVM,
            "RoleStateUnknown" => InstanceStatus::RoleStateUnknown,
            "UnresponsiveRole" => InstanceStatus::UnresponsiveRole,
            other => InstanceStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of a deployment snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    pub name: InstanceName,
    pub role: String,
    pub status: InstanceStatus,
}

impl InstanceRecord {
    pub fn new(name: InstanceName, role: impl Into<String>, status: InstanceStatus) -> Self {
        Self {
            name,
            role: role.into(),
            status,
        }
    }

    pub fn readiness(&self) -> Readiness {
        self.status.readiness()
    }

    /// True when this record's readiness is the wanted one.
    pub fn is(&self, want: Readiness) -> bool {
        self.readiness() == want
    }
}
