// ABOUTME: Library root for reimager - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod orchestrate;
pub mod output;
pub mod types;
pub mod wait;
