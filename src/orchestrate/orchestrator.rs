// ABOUTME: Sequences action requests and readiness waits into reimage / reboot runs.
// ABOUTME: Every failure aborts the whole run; instances already acted on are left as-is.

use chrono::Local;
use tokio_util::sync::CancellationToken;

use crate::client::DeploymentClient;
use crate::diagnostics::{Diagnostics, Warning};
use crate::output::{Output, timestamp};
use crate::types::{DeploymentSlot, InstanceName, Readiness, ServiceName, Snapshot};
use crate::wait::{PollPolicy, Waiter};

use super::error::OperationError;
use super::mode::{Action, ExecutionMode};
use super::summary::Summary;

/// Drives disruptive actions across one service deployment.
pub struct Orchestrator<'a, C: DeploymentClient + ?Sized> {
    client: &'a C,
    output: &'a Output,
    policy: PollPolicy,
    cancel: CancellationToken,
}

impl<'a, C: DeploymentClient + ?Sized> Orchestrator<'a, C> {
    pub fn new(client: &'a C, output: &'a Output) -> Self {
        Self {
            client,
            output,
            policy: PollPolicy::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Reimage every instance of the deployment in `slot`.
    pub async fn reimage(
        &self,
        service: &ServiceName,
        slot: DeploymentSlot,
        mode: ExecutionMode,
    ) -> Result<Summary, OperationError> {
        let snapshot = self.roster(service, slot).await?;
        let mut diagnostics = Diagnostics::default();

        let instances = match mode {
            ExecutionMode::Sequential => {
                if snapshot.is_empty() {
                    diagnostics.warn(Warning::empty_roster(format!(
                        "deployment of {service} ({slot}) has no instances; nothing to reimage"
                    )));
                }
                self.cycle_each(Action::Reimage, service, slot, snapshot.names())
                    .await?
            }
            ExecutionMode::Batched => {
                self.cycle_batch(Action::Reimage, service, slot, &snapshot)
                    .await?
            }
        };

        Ok(self.finish(Action::Reimage, mode, instances, diagnostics))
    }

    /// Reboot instances one at a time, optionally only the one named `target`.
    ///
    /// A target that matches no instance is not an error: nothing is rebooted
    /// and a warning is recorded.
    pub async fn reboot(
        &self,
        service: &ServiceName,
        slot: DeploymentSlot,
        target: Option<&InstanceName>,
    ) -> Result<Summary, OperationError> {
        let snapshot = self.roster(service, slot).await?;
        let mut diagnostics = Diagnostics::default();

        let selected: Vec<&InstanceName> = snapshot
            .names()
            .filter(|name| target.is_none_or(|wanted| wanted == *name))
            .collect();

        if selected.is_empty() {
            let warning = match target {
                Some(wanted) => Warning::unmatched_target(format!(
                    "deployment of {service} ({slot}) has no instance named {wanted}; nothing to reboot"
                )),
                None => Warning::empty_roster(format!(
                    "deployment of {service} ({slot}) has no instances; nothing to reboot"
                )),
            };
            diagnostics.warn(warning);
        }

        let instances = self
            .cycle_each(Action::Reboot, service, slot, selected)
            .await?;

        Ok(self.finish(
            Action::Reboot,
            ExecutionMode::Sequential,
            instances,
            diagnostics,
        ))
    }

    async fn roster(
        &self,
        service: &ServiceName,
        slot: DeploymentSlot,
    ) -> Result<Snapshot, OperationError> {
        let snapshot = self
            .client
            .snapshot(service, slot)
            .await
            .map_err(|source| OperationError::Roster {
                service: service.clone(),
                source,
            })?;
        tracing::info!(%service, %slot, instances = snapshot.len(), "read deployment roster");
        Ok(snapshot)
    }

    fn waiter<'w>(&'w self, service: &'w ServiceName, slot: DeploymentSlot) -> Waiter<'w, C> {
        Waiter::new(self.client, service, slot)
            .policy(self.policy)
            .cancellation(self.cancel.clone())
    }

    /// Act on each instance in turn, confirming it went down and came back
    /// before moving on.
    async fn cycle_each<'n>(
        &self,
        action: Action,
        service: &ServiceName,
        slot: DeploymentSlot,
        instances: impl IntoIterator<Item = &'n InstanceName>,
    ) -> Result<Vec<InstanceName>, OperationError> {
        let waiter = self.waiter(service, slot);
        let mut acted = Vec::new();

        for instance in instances {
            self.output.step(
                &format!("{} {instance}", action.progressive()),
                &Local::now(),
            );
            self.request(action, service, instance, slot).await?;
            acted.push(instance.clone());

            self.confirm_left_ready(&waiter, instance).await?;
            self.confirm_returned_ready(&waiter, instance).await?;

            self.output
                .step(&format!("  ✓ {instance} is ready"), &Local::now());
        }

        Ok(acted)
    }

    /// Act on every instance without waiting in between, then confirm the
    /// batch started and completed with aggregate waits.
    async fn cycle_batch(
        &self,
        action: Action,
        service: &ServiceName,
        slot: DeploymentSlot,
        snapshot: &Snapshot,
    ) -> Result<Vec<InstanceName>, OperationError> {
        let Some(roster) = snapshot.roster() else {
            return Err(OperationError::EmptyRoster {
                service: service.clone(),
            });
        };

        self.output.step(
            &format!(
                "{} {} instance(s) of {service}",
                action.progressive(),
                roster.len()
            ),
            &Local::now(),
        );

        let mut acted = Vec::with_capacity(roster.len());
        for record in roster.iter() {
            self.request(action, service, &record.name, slot).await?;
            acted.push(record.name.clone());
        }

        let waiter = self.waiter(service, slot);
        self.confirm_batch_started(&waiter).await?;
        self.confirm_batch_completed(&waiter).await?;

        Ok(acted)
    }

    async fn request(
        &self,
        action: Action,
        service: &ServiceName,
        instance: &InstanceName,
        slot: DeploymentSlot,
    ) -> Result<(), OperationError> {
        tracing::info!(%action, %service, %instance, %slot, "requesting action");

        let acknowledged = match action {
            Action::Reimage => self.client.request_reimage(service, instance, slot).await,
            Action::Reboot => self.client.request_reboot(service, instance, slot).await,
        };

        acknowledged.map_err(|source| OperationError::Action {
            action,
            instance: instance.clone(),
            source,
        })
    }

    /// The action took effect: the instance is no longer Ready.
    async fn confirm_left_ready(
        &self,
        waiter: &Waiter<'_, C>,
        instance: &InstanceName,
    ) -> Result<(), OperationError> {
        waiter.wait_for_one(instance, Readiness::NotReady).await?;
        Ok(())
    }

    /// The action completed: the instance is Ready again.
    async fn confirm_returned_ready(
        &self,
        waiter: &Waiter<'_, C>,
        instance: &InstanceName,
    ) -> Result<(), OperationError> {
        waiter.wait_for_one(instance, Readiness::Ready).await?;
        Ok(())
    }

    async fn confirm_batch_started(&self, waiter: &Waiter<'_, C>) -> Result<(), OperationError> {
        waiter.wait_for_any(Readiness::NotReady).await?;
        Ok(())
    }

    async fn confirm_batch_completed(&self, waiter: &Waiter<'_, C>) -> Result<(), OperationError> {
        waiter.wait_for_all(Readiness::Ready).await?;
        Ok(())
    }

    fn finish(
        &self,
        action: Action,
        mode: ExecutionMode,
        instances: Vec<InstanceName>,
        diagnostics: Diagnostics,
    ) -> Summary {
        let finished_at = Local::now();

        for warning in diagnostics.warnings() {
            self.output.warning(&warning.to_string());
        }
        self.output
            .success(&format!("Done at {}", timestamp(&finished_at)));

        Summary {
            action,
            mode,
            instances,
            finished_at,
            diagnostics,
        }
    }
}
