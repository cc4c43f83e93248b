//! PostgreSQL persistence for the movie catalog.
//!
//! Write-side repositories take `&mut PgConnection` so callers can run them
//! inside a transaction; read-side queries take `&PgPool`.

use std::time::Duration;

use serde::Serialize;
use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod repositories;

pub use error::{is_connectivity_error, is_constraint_violation};

pub type DbPool = sqlx::PgPool;

/// A transaction scoping every write made for one document.
pub type DbTransaction<'c> = sqlx::Transaction<'c, sqlx::Postgres>;

/// Tables the loader writes to. The schema must already exist.
pub const EXPECTED_TABLES: &[&str] = &[
    "cast_members",
    "commentaries",
    "movie_cast",
    "movies",
    "songs",
];

/// Create a connection pool from a database URL.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Return the server's version banner.
pub async fn server_version(pool: &DbPool) -> Result<String, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT version()").fetch_one(pool).await
}

/// Result of comparing the public schema against [`EXPECTED_TABLES`].
#[derive(Debug, Clone, Serialize)]
pub struct SchemaStatus {
    /// Every base table in the `public` schema, sorted.
    pub tables: Vec<String>,
    /// Expected tables that are absent.
    pub missing: Vec<&'static str>,
}

impl SchemaStatus {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// List public tables and report which expected ones are missing.
pub async fn verify_schema(pool: &DbPool) -> Result<SchemaStatus, sqlx::Error> {
    let tables = sqlx::query_scalar::<_, String>(
        "SELECT table_name::text
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
         ORDER BY table_name",
    )
    .fetch_all(pool)
    .await?;

    let missing = EXPECTED_TABLES
        .iter()
        .copied()
        .filter(|expected| !tables.iter().any(|t| t == expected))
        .collect();

    Ok(SchemaStatus { tables, missing })
}
