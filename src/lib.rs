//! PAM Desa API - Village water utility backend
//!
//! This crate provides the management backend for a village drinking
//! water utility: customer accounts, meter-reading billing, and a
//! problem report workflow, all over a schemaless document store.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **access**: Role-based authorization rules
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (document store, repositories)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (partial-update fields)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server against an empty store
//! cargo run -- serve
//!
//! # Start with development data
//! cargo run -- serve --seed seed/dev.json
//!
//! # Validate a fixture
//! cargo run -- check-seed seed/dev.json
//! ```

pub mod access;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Session, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::MemoryStore;
