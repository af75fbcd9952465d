// ABOUTME: Shared helper for building a deployment client from CLI arguments.
// ABOUTME: Validates credentials and names before any remote call is made.

use crate::cli::ServiceArgs;
use reimager::client::{Credentials, ServiceManagementClient};
use reimager::config::Settings;
use reimager::error::Result;
use reimager::output::Output;
use reimager::types::{DeploymentSlot, ServiceName};

/// A ready-to-use client plus the deployment it targets.
pub struct Connection {
    pub client: ServiceManagementClient,
    pub service: ServiceName,
    pub slot: DeploymentSlot,
}

/// Connect to the management endpoint for one hosted service.
///
/// Fails with an invalid-argument error when the subscription is blank, the
/// certificate cannot be read, or the service name is malformed.
pub fn connect(settings: &Settings, args: ServiceArgs, output: &Output) -> Result<Connection> {
    let credentials = Credentials::load(&args.subscription_id, &args.certificate_file)?;
    let service = ServiceName::new(args.service_name.trim())?;
    let slot = args.slot.unwrap_or(settings.slot);

    output.progress(&format!(
        "  → Using {} for subscription {}",
        settings.management.endpoint,
        credentials.subscription_id()
    ));
    let client = ServiceManagementClient::new(&credentials, &settings.management)?;

    Ok(Connection {
        client,
        service,
        slot,
    })
}
