//! Database layer with `SeaORM` entities and event sources.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - [`SeaOrmStore`], implementing the core event source traits
//! - Database migrations

pub mod entities;
pub mod error;
pub mod migration;
pub mod repositories;

pub use error::DbError;
pub use repositories::SeaOrmStore;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sitebook_shared::DatabaseConfig;
use tracing::info;

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection using the configured pool bounds.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbError> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!(
        max_connections = config.max_connections,
        "Connected to database"
    );
    Ok(db)
}
