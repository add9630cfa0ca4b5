//! Start the Relief Desk server.

use clap::Args;

use relief_core::error::AppError;
use relief_database::Stores;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, cli: &super::Cli) -> Result<(), AppError> {
    let mut config = cli.load_config()?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    tracing::info!(
        env = %cli.env,
        address = %config.server.bind_address(),
        "Starting Relief Desk"
    );

    let pool = super::create_db_pool(&config).await?;
    if !args.no_migrate {
        relief_database::migration::run_migrations(pool.pool()).await?;
    }

    relief_api::run_server(config, Stores::postgres(pool.into_pool())).await
}
