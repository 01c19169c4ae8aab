use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::BootstrapSettings;
use crate::errors::InternalError;

/// Connect to the database and bring the schema up to date
pub async fn init_database(
    settings: &BootstrapSettings,
) -> Result<DatabaseConnection, InternalError> {
    let db = Database::connect(&settings.database_url)
        .await
        .map_err(|e| InternalError::database("connect_database", e))?;
    tracing::debug!("Connected to database: {}", settings.database_url);

    Migrator::up(&db, None)
        .await
        .map_err(|e| InternalError::database("run_migrations", e))?;
    tracing::info!("Database migrations completed");

    Ok(db)
}
