// ABOUTME: Reimage command implementation.
// ABOUTME: Runs a sequential or batched reimage of every instance of a service.

use super::connect::connect;
use crate::cli::ServiceArgs;
use reimager::config::Settings;
use reimager::error::Result;
use reimager::orchestrate::{ExecutionMode, Orchestrator};
use reimager::output::Output;
use tokio_util::sync::CancellationToken;

/// Reimage every instance of the service named in `args`.
pub async fn reimage(
    settings: &Settings,
    args: ServiceArgs,
    mode: ExecutionMode,
    mut output: Output,
    cancel: CancellationToken,
) -> Result<()> {
    output.start_timer();
    let connection = connect(settings, args, &output)?;

    output.progress(&format!(
        "Starting {mode} reimage of {} ({} slot)",
        connection.service, connection.slot
    ));

    let summary = Orchestrator::new(&connection.client, &output)
        .policy(settings.poll.policy())
        .cancellation(cancel)
        .reimage(&connection.service, connection.slot, mode)
        .await?;

    tracing::info!(
        service = %connection.service,
        instances = summary.instances.len(),
        "reimage finished"
    );
    Ok(())
}
