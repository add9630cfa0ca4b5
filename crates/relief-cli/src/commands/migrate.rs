//! Database migration command.

use relief_core::error::AppError;

use crate::output;

/// Apply every pending migration.
pub async fn execute(cli: &super::Cli) -> Result<(), AppError> {
    let config = cli.load_config()?;
    let pool = super::create_db_pool(&config).await?;

    println!("Running database migrations...");
    relief_database::migration::run_migrations(pool.pool()).await?;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
