//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `check-seed` - Validate a seed fixture

pub mod args;

pub use args::{Cli, Commands};
