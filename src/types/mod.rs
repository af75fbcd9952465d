// ABOUTME: Validated domain types for hosted services and their role instances.
// ABOUTME: Names, statuses, snapshots, and deployment slots.

mod instance;
mod service_name;
mod slot;
mod snapshot;

pub use instance::{InstanceName, InstanceNameError, InstanceRecord, InstanceStatus, Readiness};
pub use service_name::{ServiceName, ServiceNameError};
pub use slot::DeploymentSlot;
pub use snapshot::Snapshot;
