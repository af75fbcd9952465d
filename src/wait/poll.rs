// ABOUTME: Bounded fixed-interval retry combinator shared by every wait.
// ABOUTME: Sleeps before each check and stops on success, abort, cancel, or budget.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Fixed delay before every check, and the maximum number of checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    interval: Duration,
    max_attempts: u32,
}

impl PollPolicy {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 40;

    /// A zero attempt budget is raised to one so every wait performs at least one check.
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Upper bound on time spent sleeping in one wait.
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL, Self::DEFAULT_MAX_ATTEMPTS)
    }
}

/// Result of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Satisfied,
    Pending,
}

/// Why polling stopped without the condition being satisfied.
#[derive(Debug, PartialEq, Eq)]
pub enum PollError<E> {
    /// Every attempt in the budget came back `Pending`.
    Exhausted { attempts: u32 },
    /// The cancellation token fired before a check could run.
    Cancelled,
    /// A check failed; no further attempts are made.
    Aborted(E),
}

/// Run `check` up to `policy.max_attempts()` times, sleeping `policy.interval()`
/// before each call, including the first.
///
/// Each iteration completes (delay, check) before the next one starts. The
/// cancellation token is honoured before and during the delay, never while a
/// check is in flight. Returns the 1-based attempt that was satisfied.
pub async fn poll_until<F, Fut, E>(
    policy: &PollPolicy,
    cancel: &CancellationToken,
    mut check: F,
) -> Result<u32, PollError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Check, E>>,
{
    for attempt in 1..=policy.max_attempts() {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PollError::Cancelled),
            _ = tokio::time::sleep(policy.interval()) => {}
        }

        if check(attempt).await.map_err(PollError::Aborted)? == Check::Satisfied {
            return Ok(attempt);
        }
    }

    Err(PollError::Exhausted {
        attempts: policy.max_attempts(),
    })
}
