// ABOUTME: Point-in-time roster of a deployment's role instances.
// ABOUTME: Fetched fresh on every poll and never cached across queries.

use nonempty::NonEmpty;

use super::instance::{InstanceName, InstanceRecord};

/// One read of a deployment's instance roster, in the order the remote reported it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    instances: Vec<InstanceRecord>,
}

impl Snapshot {
    pub fn new(instances: Vec<InstanceRecord>) -> Self {
        Self { instances }
    }

    pub fn instances(&self) -> &[InstanceRecord] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// First record with the given name, in snapshot order.
    pub fn find(&self, name: &InstanceName) -> Option<&InstanceRecord> {
        self.instances.iter().find(|record| &record.name == name)
    }

    /// The roster, or `None` when the deployment reports no instances.
    pub fn roster(&self) -> Option<NonEmpty<&InstanceRecord>> {
        NonEmpty::collect(self.instances.iter())
    }

    pub fn names(&self) -> impl Iterator<Item = &InstanceName> {
        self.instances.iter().map(|record| &record.name)
    }
}

impl From<Vec<InstanceRecord>> for Snapshot {
    fn from(instances: Vec<InstanceRecord>) -> Self {
        Self::new(instances)
    }
}
