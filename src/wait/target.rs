// ABOUTME: Aggregation rules for readiness waits: one instance, any, or all.
// ABOUTME: Evaluates a single snapshot against the wanted readiness.

use std::fmt;

use crate::types::{InstanceName, Readiness, Snapshot};

/// Which instances a wait is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The named instance; its absence from a snapshot is fatal.
    Instance(InstanceName),
    /// At least one instance, scanned in snapshot order.
    Any,
    /// Every instance in the snapshot.
    All,
}

/// Outcome of checking one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Satisfied,
    Pending,
    /// The named instance is absent, or the roster is empty.
    Missing,
}

impl Target {
    pub fn evaluate(&self, snapshot: &Snapshot, want: Readiness) -> Verdict {
        let holds = match self {
            Target::Instance(name) => match snapshot.find(name) {
                Some(record) => record.is(want),
                None => return Verdict::Missing,
            },
            Target::Any => match snapshot.roster() {
                Some(roster) => roster.iter().any(|record| record.is(want)),
                None => return Verdict::Missing,
            },
            Target::All => match snapshot.roster() {
                Some(roster) => roster.iter().all(|record| record.is(want)),
                None => return Verdict::Missing,
            },
        };

        if holds {
            Verdict::Satisfied
        } else {
            Verdict::Pending
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Instance(name) => write!(f, "instance {name}"),
            Target::Any => write!(f, "any instance"),
            Target::All => write!(f, "all instances"),
        }
    }
}
