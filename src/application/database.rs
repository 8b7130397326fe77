use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

use crate::config::CONFIG;
use crate::error::{AppError, Result};
use crate::migrations::Migrator;
use crate::services::seed::seed_if_empty;

pub type DbConn = DatabaseConnection;

/// Create a new database connection, run migrations and seed using config
pub async fn connect() -> Result<DbConn> {
    connect_with_url(&CONFIG.database.database_url).await
}

/// Create a new database connection with a specific URL, run migrations and
/// seed an empty store
pub async fn connect_with_url(database_url: &str) -> Result<DbConn> {
    tracing::info!("Connecting to database...");

    let mut opts = ConnectOptions::new(database_url);
    opts.max_connections(CONFIG.database.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to connect to database: {}", e)))?;

    migrate(&db).await?;

    Ok(db)
}

/// Apply pending migrations, then seed if the companies table is empty
pub async fn migrate(db: &DbConn) -> Result<()> {
    tracing::info!("Running database migrations...");
    Migrator::up(db, None)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to run migrations: {}", e)))?;
    tracing::info!("Database migrations completed");

    if seed_if_empty(db)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to seed database: {}", e)))?
    {
        tracing::info!("Seeded demo companies and accounts");
    }

    Ok(())
}
