use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use photostow_core::PhotoDocument;

/// A stored photo document row.
#[derive(Debug, Clone, FromRow)]
pub struct PhotoRecord {
    pub id: Uuid,
    pub thumb_url: String,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub width: i32,
    pub height: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a photo document, returning the generated id.
    /// Appends only; there are no uniqueness or update semantics.
    #[tracing::instrument(skip(self, document))]
    pub async fn add_photo(&self, document: &PhotoDocument) -> Result<Uuid> {
        let record: PhotoRecord = sqlx::query_as::<_, PhotoRecord>(
            r#"
            INSERT INTO photos (thumb_url, image_url, latitude, longitude, width, height)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, thumb_url, image_url, latitude, longitude, width, height, created_at
            "#,
        )
        .bind(&document.thumb_url)
        .bind(&document.image_url)
        .bind(document.latitude)
        .bind(document.longitude)
        .bind(document.width)
        .bind(document.height)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to insert photo document");
            anyhow::anyhow!("failed to insert photo document: {}", e)
        })?;

        tracing::debug!(photo_id = %record.id, "photo document inserted");
        Ok(record.id)
    }

    pub async fn get_photo(&self, id: Uuid) -> Result<Option<PhotoRecord>> {
        sqlx::query_as::<_, PhotoRecord>(
            r#"
            SELECT id, thumb_url, image_url, latitude, longitude, width, height, created_at
            FROM photos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch photo document")
    }
}
