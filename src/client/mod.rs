// ABOUTME: Deployment client seam consumed by the wait engine and orchestrator.
// ABOUTME: Exposes snapshot queries and the reimage / reboot actions.

mod credentials;
mod error;
mod service_management;
mod xml;

pub use credentials::{Credentials, CredentialsError};
pub use error::{ClientError, ClientErrorKind};
pub use service_management::ServiceManagementClient;

use async_trait::async_trait;

use crate::types::{DeploymentSlot, InstanceName, ServiceName, Snapshot};

/// Access to one hosted service's deployments.
///
/// Action calls return once the remote has acknowledged the request, not when
/// the action has completed. Observing completion is the wait engine's job.
#[async_trait]
pub trait DeploymentClient: Send + Sync {
    /// Read the current instance roster of the deployment in `slot`.
    async fn snapshot(
        &self,
        service: &ServiceName,
        slot: DeploymentSlot,
    ) -> Result<Snapshot, ClientError>;

    /// Ask the remote to reimage one instance.
    async fn request_reimage(
        &self,
        service: &ServiceName,
        instance: &InstanceName,
        slot: DeploymentSlot,
    ) -> Result<(), ClientError>;

    /// Ask the remote to reboot one instance.
    async fn request_reboot(
        &self,
        service: &ServiceName,
        instance: &InstanceName,
        slot: DeploymentSlot,
    ) -> Result<(), ClientError>;
}
