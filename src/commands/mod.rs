// ABOUTME: Command module aggregator for the reimager CLI.
// ABOUTME: Re-exports the reimage and reboot command handlers.

mod connect;
mod reboot;
mod reimage;

pub use reboot::reboot;
pub use reimage::reimage;
