// bookstore_server/src/db/mod.rs

//! PostgreSQL connection setup and the persistent store.

pub mod pg_store;
mod rows;

pub use pg_store::PgStore;

use crate::config::AppConfig;
use crate::errors::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Opens the pool and brings the schema up to date.
pub async fn connect(database_url: &str, config: &AppConfig) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(config.database_max_connections)
    .connect(database_url)
    .await?;
  info!(max_connections = config.database_max_connections, "Connected to the database.");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .map_err(|e| crate::errors::AppError::Storage(e.into()))?;
  info!("Database migrations applied.");
  Ok(pool)
}
