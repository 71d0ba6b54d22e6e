//! Environment-based configuration.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::constants::THUMBNAIL_WIDTH;

/// Runtime configuration, loaded once at startup from the environment
/// (optionally seeded from a `.env` file via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    /// Bucket receiving raw uploads (the event source).
    pub uploads_bucket: String,
    /// Bucket holding relocated originals.
    pub final_bucket: String,
    /// Bucket holding generated thumbnails.
    pub thumbnails_bucket: String,
    /// AWS region (or region identifier for S3-compatible providers).
    pub region: String,
    /// Custom endpoint for S3-compatible providers (MinIO etc.).
    pub endpoint_url: Option<String>,
    /// Queue delivering upload notifications.
    pub queue_url: String,
    /// Root under which per-event scratch directories are created.
    pub scratch_root: PathBuf,
    /// Target thumbnail width in pixels.
    pub thumbnail_width: u32,
    /// Deployment revision identifier, used for logging only.
    pub service_revision: Option<String>,
    /// Postgres connection string for the photo document store.
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Best effort; a missing .env file is not an error.
        dotenvy::dotenv().ok();

        let uploads_bucket =
            env::var("UPLOADS_BUCKET").context("UPLOADS_BUCKET must be set")?;
        let final_bucket = env::var("FINAL_BUCKET").context("FINAL_BUCKET must be set")?;
        let thumbnails_bucket =
            env::var("THUMBNAILS_BUCKET").context("THUMBNAILS_BUCKET must be set")?;
        let queue_url = env::var("QUEUE_URL").context("QUEUE_URL must be set")?;

        let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let endpoint_url = env::var("S3_ENDPOINT_URL").ok();

        let scratch_root = env::var("SCRATCH_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir());

        let thumbnail_width = match env::var("THUMBNAIL_WIDTH") {
            Ok(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("THUMBNAIL_WIDTH is not a valid width: {}", raw))?,
            Err(_) => THUMBNAIL_WIDTH,
        };

        Ok(Config {
            uploads_bucket,
            final_bucket,
            thumbnails_bucket,
            region,
            endpoint_url,
            queue_url,
            scratch_root,
            thumbnail_width,
            service_revision: env::var("SERVICE_REVISION").ok(),
            database_url: env::var("DATABASE_URL").ok(),
        })
    }
}
