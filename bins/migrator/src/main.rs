//! Database migration runner for Sitebook.
//!
//! With `DATABASE_URL` set (environment or `.env`) this is the
//! sea-orm-migration CLI: `migrator up | down | status | fresh | refresh | reset`.
//!
//! Without it, every pending migration is applied to `database.url` from the
//! layered configuration (`config/default.toml`, `SITEBOOK__DATABASE__URL`).

use std::error::Error;

use sea_orm_migration::prelude::*;
use sitebook_db::connect_with;
use sitebook_db::migration::Migrator;
use sitebook_shared::{AppConfig, DatabaseConfig};

/// Database to migrate directly, or `None` when `DATABASE_URL` hands control
/// to the sea-orm-migration CLI.
fn configured_database() -> Result<Option<DatabaseConfig>, ::config::ConfigError> {
    if std::env::var_os("DATABASE_URL").is_some() {
        return Ok(None);
    }
    Ok(Some(AppConfig::load()?.database))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let Some(database) = configured_database()? else {
        cli::run_cli(Migrator).await;
        return Ok(());
    };

    println!("Connecting to configured database...");
    let db = connect_with(&database).await?;

    let pending: Vec<String> = Migrator::get_pending_migrations(&db)
        .await?
        .iter()
        .map(|migration| migration.name().to_string())
        .collect();
    if pending.is_empty() {
        println!("Schema is up to date");
        return Ok(());
    }

    Migrator::up(&db, None).await?;
    for name in &pending {
        println!("Applied {name}");
    }
    Ok(())
}
