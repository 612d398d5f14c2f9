//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// PAM Desa API - Village water utility backend
#[derive(Parser, Debug)]
#[command(name = "pam-desa-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Validate a seed fixture without starting the server
    CheckSeed(CheckSeedArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "SERVER_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "SERVER_PORT")]
    pub port: u16,

    /// Seed fixture loaded into the store at startup
    #[arg(short, long, env = "SEED_PATH")]
    pub seed: Option<PathBuf>,
}

/// Arguments for the check-seed command
#[derive(Parser, Debug)]
pub struct CheckSeedArgs {
    /// Seed fixture to validate
    pub path: PathBuf,
}
