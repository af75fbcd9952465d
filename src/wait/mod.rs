// ABOUTME: Wait engine: polls a deployment until a readiness condition holds.
// ABOUTME: One fixed-interval bounded loop shared by the one / any / all variants.

mod error;
mod poll;
mod target;
mod waiter;

pub use error::{WaitError, WaitErrorKind};
pub use poll::{Check, PollError, PollPolicy, poll_until};
pub use target::{Target, Verdict};
pub use waiter::Waiter;
