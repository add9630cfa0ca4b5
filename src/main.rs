//! Relief Desk server.
//!
//! Loads configuration, connects to PostgreSQL, applies migrations and serves
//! the HTTP API until Ctrl+C.

use tracing_subscriber::{EnvFilter, fmt};

use relief_core::config::{AppConfig, LogFormat};
use relief_core::error::{AppError, ErrorKind};
use relief_database::{DatabasePool, Stores};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `RELIEF_CONFIG_DIR` (default `config`) with the
/// `RELIEF_ENV` overlay (default `development`).
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("RELIEF_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("RELIEF_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&dir, &env)
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init(),
        LogFormat::Pretty => fmt().pretty().with_env_filter(filter).init(),
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Relief Desk v{}", env!("CARGO_PKG_VERSION"));

    let pool = DatabasePool::connect(&config.database).await?;
    if !pool.health_check().await? {
        return Err(AppError::new(ErrorKind::Database, "Database ping returned an unexpected value"));
    }

    relief_database::migration::run_migrations(pool.pool()).await?;

    relief_api::run_server(config, Stores::postgres(pool.into_pool())).await
}
