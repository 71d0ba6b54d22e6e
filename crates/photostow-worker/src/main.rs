mod listener;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;

use photostow_core::Config;
use photostow_db::PhotoRepository;
use photostow_processing::UploadPipeline;
use photostow_storage::S3ObjectStore;

use crate::listener::QueueListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    telemetry::init_tracing();

    tracing::info!(
        revision = %config.service_revision.as_deref().unwrap_or("unknown"),
        uploads_bucket = %config.uploads_bucket,
        final_bucket = %config.final_bucket,
        thumbnails_bucket = %config.thumbnails_bucket,
        "starting photostow worker"
    );

    let source = S3ObjectStore::connect(
        config.uploads_bucket.clone(),
        config.region.clone(),
        config.endpoint_url.clone(),
    )
    .await
    .context("failed to connect to uploads bucket")?;
    let final_store = S3ObjectStore::connect(
        config.final_bucket.clone(),
        config.region.clone(),
        config.endpoint_url.clone(),
    )
    .await
    .context("failed to connect to final bucket")?;
    let thumbnails = S3ObjectStore::connect(
        config.thumbnails_bucket.clone(),
        config.region.clone(),
        config.endpoint_url.clone(),
    )
    .await
    .context("failed to connect to thumbnails bucket")?;

    let pipeline = Arc::new(UploadPipeline::new(
        Arc::new(source),
        Arc::new(final_store),
        Arc::new(thumbnails),
        config.thumbnail_width,
        config.scratch_root.clone(),
    ));

    // Photo documents are only persisted when a database is configured.
    let photos = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .context("failed to connect to database")?;
            photostow_db::run_migrations(&pool).await?;
            Some(PhotoRepository::new(pool))
        }
        None => {
            tracing::info!("DATABASE_URL not set, photo documents disabled");
            None
        }
    };

    let sqs_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;
    let sqs_client = aws_sdk_sqs::Client::new(&sqs_config);

    let listener = QueueListener::new(
        sqs_client,
        config.queue_url.clone(),
        pipeline,
        photos,
    );

    tokio::select! {
        result = listener.run() => {
            result.context("queue listener exited")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received, stopping worker");
        }
    }

    Ok(())
}
