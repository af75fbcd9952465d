// ABOUTME: Reboot command implementation.
// ABOUTME: Reboots instances one at a time, optionally just a single named one.

use super::connect::connect;
use crate::cli::ServiceArgs;
use reimager::config::Settings;
use reimager::error::Result;
use reimager::orchestrate::Orchestrator;
use reimager::output::Output;
use reimager::types::InstanceName;
use tokio_util::sync::CancellationToken;

/// Reboot the instances of the service named in `args`.
pub async fn reboot(
    settings: &Settings,
    args: ServiceArgs,
    instance: Option<String>,
    mut output: Output,
    cancel: CancellationToken,
) -> Result<()> {
    output.start_timer();
    let target = InstanceName::filter(instance.as_deref())?;
    let connection = connect(settings, args, &output)?;

    match &target {
        Some(name) => output.progress(&format!(
            "Starting reboot of {name} in {} ({} slot)",
            connection.service, connection.slot
        )),
        None => output.progress(&format!(
            "Starting sequential reboot of {} ({} slot)",
            connection.service, connection.slot
        )),
    }

    let summary = Orchestrator::new(&connection.client, &output)
        .policy(settings.poll.policy())
        .cancellation(cancel)
        .reboot(&connection.service, connection.slot, target.as_ref())
        .await?;

    tracing::info!(
        service = %connection.service,
        instances = summary.instances.len(),
        "reboot finished"
    );
    Ok(())
}
