//! Upload pipeline: classify → relocate → thumbnail → cleanup.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use photostow_core::models::{final_object_name, thumbnail_object_name};
use photostow_core::{constants, GpsCoordinates, UploadEvent};
use photostow_storage::{ObjectStore, StorageError};

use crate::exif::extract_gps;
use crate::image::{generate_thumbnail, ThumbnailError};

/// Pipeline failure, one variant per stage so logs name what broke.
///
/// On any failure the source object is left in place for redelivery; only
/// the two success paths (`Processed`, `Skipped`) delete it. The scratch
/// directory is reclaimed on every path by its drop guard.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to prepare scratch directory: {0}")]
    Scratch(#[source] std::io::Error),
    #[error("failed to download source object: {0}")]
    Download(#[source] StorageError),
    #[error("failed to store final object: {0}")]
    StoreFinal(#[source] StorageError),
    #[error("failed to generate thumbnail: {0}")]
    Thumbnail(#[source] ThumbnailError),
    #[error("failed to store thumbnail: {0}")]
    StoreThumbnail(#[source] StorageError),
    #[error("failed to delete source object: {0}")]
    DeleteSource(#[source] StorageError),
}

/// Result of handling one upload event.
#[derive(Debug)]
pub enum UploadOutcome {
    /// The image was relocated and thumbnailed; the source is gone.
    Processed {
        final_key: String,
        final_url: String,
        thumbnail_key: String,
        thumbnail_url: String,
        width: u32,
        height: u32,
        /// Decimal GPS position from the source EXIF block, when present.
        gps: Option<GpsCoordinates>,
    },
    /// Unsupported content type; the source was deleted, nothing produced.
    Skipped { content_type: String },
}

/// Event handler for upload notifications.
///
/// Holds one store per bucket so tests can substitute fakes; nothing here
/// constructs a cloud client.
pub struct UploadPipeline {
    source: Arc<dyn ObjectStore>,
    final_store: Arc<dyn ObjectStore>,
    thumbnails: Arc<dyn ObjectStore>,
    thumbnail_width: u32,
    scratch_root: PathBuf,
}

impl UploadPipeline {
    pub fn new(
        source: Arc<dyn ObjectStore>,
        final_store: Arc<dyn ObjectStore>,
        thumbnails: Arc<dyn ObjectStore>,
        thumbnail_width: u32,
        scratch_root: PathBuf,
    ) -> Self {
        Self {
            source,
            final_store,
            thumbnails,
            thumbnail_width,
            scratch_root,
        }
    }

    /// Handle one upload event end to end.
    #[tracing::instrument(
        skip(self, event),
        fields(bucket = %event.bucket, key = %event.name, generation = event.generation)
    )]
    pub async fn handle(&self, event: &UploadEvent) -> Result<UploadOutcome, PipelineError> {
        let Some(kind) = event.content_kind() else {
            tracing::info!(
                content_type = %event.content_type,
                "unsupported content type, deleting source without processing"
            );
            self.source
                .delete(&event.name)
                .await
                .map_err(PipelineError::DeleteSource)?;
            return Ok(UploadOutcome::Skipped {
                content_type: event.content_type.clone(),
            });
        };

        let final_name = final_object_name(event.generation, kind);

        // Per-event scratch directory; the generation number in the prefix
        // keeps concurrent invocations on one host from colliding, and the
        // TempDir guard removes it on every exit path.
        tokio::fs::create_dir_all(&self.scratch_root)
            .await
            .map_err(PipelineError::Scratch)?;
        let scratch = tempfile::Builder::new()
            .prefix(&format!(
                "{}-{}-",
                constants::SCRATCH_DIR_NAME,
                event.generation
            ))
            .tempdir_in(&self.scratch_root)
            .map_err(PipelineError::Scratch)?;

        let local_path = scratch.path().join(&final_name);
        self.source
            .download_to_path(&event.name, &local_path)
            .await
            .map_err(PipelineError::Download)?;

        let final_url = self
            .final_store
            .upload_file(&local_path, &final_name, kind.content_type())
            .await
            .map_err(PipelineError::StoreFinal)?;

        let data = tokio::fs::read(&local_path)
            .await
            .map_err(PipelineError::Scratch)?;
        let thumbnail = generate_thumbnail(&data, kind, self.thumbnail_width)
            .map_err(PipelineError::Thumbnail)?;

        let thumbnail_key = thumbnail_object_name(self.thumbnail_width, &final_name);
        let thumbnail_path = scratch.path().join(&thumbnail_key);
        tokio::fs::write(&thumbnail_path, &thumbnail.data)
            .await
            .map_err(PipelineError::Scratch)?;

        let thumbnail_url = self
            .thumbnails
            .upload_file(&thumbnail_path, &thumbnail_key, kind.content_type())
            .await
            .map_err(PipelineError::StoreThumbnail)?;

        // Best effort; images without GPS metadata are still processed.
        let gps = extract_gps(&local_path);

        // Release the scratch directory explicitly so an unlikely cleanup
        // failure surfaces before the source delete.
        scratch.close().map_err(PipelineError::Scratch)?;

        self.source
            .delete(&event.name)
            .await
            .map_err(PipelineError::DeleteSource)?;

        tracing::info!(
            final_key = %final_name,
            thumbnail_key = %thumbnail_key,
            width = thumbnail.width,
            height = thumbnail.height,
            has_gps = gps.is_some(),
            "upload processed"
        );

        Ok(UploadOutcome::Processed {
            final_key: final_name,
            final_url,
            thumbnail_key,
            thumbnail_url,
            width: thumbnail.width,
            height: thumbnail.height,
            gps,
        })
    }
}
