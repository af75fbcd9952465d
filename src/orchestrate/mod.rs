// ABOUTME: Orchestration of reimage and reboot runs over a deployment's instances.
// ABOUTME: Exports the orchestrator, execution modes, errors, and run summary.

mod error;
mod mode;
mod orchestrator;
mod summary;

pub use error::{OperationError, OperationErrorKind};
pub use mode::{Action, ExecutionMode};
pub use orchestrator::Orchestrator;
pub use summary::Summary;
