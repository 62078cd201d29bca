//! PTK Core - Backend logic for PDF Toolkit Desk
//!
//! This crate contains all business logic with zero UI dependencies.
//! It can be used by the CLI host or a GUI shell.

pub mod config;
pub mod engine;
pub mod jobs;
pub mod logging;
pub mod options;
pub mod orchestrator;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
