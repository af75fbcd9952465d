// ABOUTME: Readiness waits against a live deployment.
// ABOUTME: wait_for_one / wait_for_any / wait_for_all over the shared poll loop.

use tokio_util::sync::CancellationToken;

use crate::client::{ClientError, DeploymentClient};
use crate::types::{DeploymentSlot, InstanceName, Readiness, ServiceName};

use super::error::WaitError;
use super::poll::{Check, PollError, PollPolicy, poll_until};
use super::target::{Target, Verdict};

/// Polls one service deployment until a readiness condition holds.
pub struct Waiter<'a, C: DeploymentClient + ?Sized> {
    client: &'a C,
    service: &'a ServiceName,
    slot: DeploymentSlot,
    policy: PollPolicy,
    cancel: CancellationToken,
}

enum Halt {
    Missing,
    Client(ClientError),
}

impl<'a, C: DeploymentClient + ?Sized> Waiter<'a, C> {
    pub fn new(client: &'a C, service: &'a ServiceName, slot: DeploymentSlot) -> Self {
        Self {
            client,
            service,
            slot,
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

    /// Wait until the named instance's readiness equals `want`.
    ///
    /// Fails with `NotFound` on the first snapshot that lacks the instance.
    pub async fn wait_for_one(
        &self,
        instance: &InstanceName,
        want: Readiness,
    ) -> Result<u32, WaitError> {
        self.wait_until(Target::Instance(instance.clone()), want)
            .await
    }

    /// Wait until at least one instance's readiness equals `want`.
    pub async fn wait_for_any(&self, want: Readiness) -> Result<u32, WaitError> {
        self.wait_until(Target::Any, want).await
    }

    /// Wait until every instance's readiness equals `want`.
    pub async fn wait_for_all(&self, want: Readiness) -> Result<u32, WaitError> {
        self.wait_until(Target::All, want).await
    }

    /// Poll until `target` satisfies `want`; returns the attempt that succeeded.
    pub async fn wait_until(&self, target: Target, want: Readiness) -> Result<u32, WaitError> {
        let target_ref = &target;

        let outcome = poll_until(&self.policy, &self.cancel, move |attempt| async move {
            let snapshot = self
                .client
                .snapshot(self.service, self.slot)
                .await
                .map_err(Halt::Client)?;

            let verdict = target_ref.evaluate(&snapshot, want);
            tracing::debug!(
                condition = %target_ref,
                %want,
                attempt,
                instances = snapshot.len(),
                ?verdict,
                "polled deployment"
            );

            match verdict {
                Verdict::Satisfied => Ok(Check::Satisfied),
                Verdict::Pending => Ok(Check::Pending),
                Verdict::Missing => Err(Halt::Missing),
            }
        })
        .await;

        match outcome {
            Ok(attempt) => Ok(attempt),
            Err(PollError::Exhausted { attempts }) => Err(WaitError::Timeout {
                target,
                want,
                attempts,
            }),
            Err(PollError::Cancelled) => Err(WaitError::Cancelled { target }),
            Err(PollError::Aborted(Halt::Missing)) => Err(WaitError::NotFound { target }),
            Err(PollError::Aborted(Halt::Client(e))) => Err(WaitError::Client(e)),
        }
    }
}
