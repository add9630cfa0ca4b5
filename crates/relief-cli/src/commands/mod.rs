//! CLI command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod policy;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use relief_core::config::AppConfig;
use relief_core::error::AppError;
use relief_database::DatabasePool;

/// Relief Desk: disaster-relief case management
#[derive(Debug, Parser)]
#[command(name = "relief-cli", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and the environment overlays
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load, e.g. `production`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Apply database migrations
    Migrate,
    /// Admin account management
    Admin(admin::AdminArgs),
    /// Inspect the access policy table
    Policy(policy::PolicyArgs),
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.command {
            Commands::Serve(_) => "info",
            _ => "warn",
        }
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, self).await,
            Commands::Migrate => migrate::execute(self).await,
            Commands::Admin(args) => admin::execute(args, self).await,
            Commands::Policy(args) => policy::execute(args, self.format),
        }
    }

    /// Load configuration from the selected directory and environment.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load(&self.config_dir, &self.env)
    }
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
