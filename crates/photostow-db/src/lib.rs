//! Photostow Database Layer
//!
//! Postgres-backed repository for photo documents.

mod photo;

pub use photo::{PhotoRecord, PhotoRepository};

/// Run pending migrations against the given pool.
pub async fn run_migrations(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| anyhow::anyhow!("failed to run migrations: {}", e))
}
