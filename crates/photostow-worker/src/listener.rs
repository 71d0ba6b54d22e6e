//! Queue listener: long-polls upload notifications and feeds the pipeline.

use std::sync::Arc;

use anyhow::Result;
use aws_sdk_sqs::Client;

use photostow_core::{PhotoDocument, UploadEvent};
use photostow_db::PhotoRepository;
use photostow_processing::{UploadOutcome, UploadPipeline};

/// Long-polling consumer of upload notifications.
///
/// Each message body is one `UploadEvent` JSON document. Messages are
/// deleted only after the pipeline finished; a pipeline failure leaves the
/// message in the queue for redelivery. Malformed bodies are logged,
/// deleted, and skipped.
pub struct QueueListener {
    client: Client,
    queue_url: String,
    pipeline: Arc<UploadPipeline>,
    photos: Option<PhotoRepository>,
}

impl QueueListener {
    pub fn new(
        client: Client,
        queue_url: String,
        pipeline: Arc<UploadPipeline>,
        photos: Option<PhotoRepository>,
    ) -> Self {
        Self {
            client,
            queue_url,
            pipeline,
            photos,
        }
    }

    /// Receive and handle messages until the task is cancelled.
    pub async fn run(&self) -> Result<()> {
        loop {
            let resp = self
                .client
                .receive_message()
                .queue_url(&self.queue_url)
                .max_number_of_messages(10)
                .wait_time_seconds(10)
                .send()
                .await?;

            let Some(messages) = resp.messages else {
                tracing::debug!("no messages received from queue");
                continue;
            };

            for msg in messages {
                let Some(body) = msg.body() else {
                    tracing::warn!("received message with empty body, skipping");
                    self.delete_message(msg.receipt_handle()).await;
                    continue;
                };

                let event: UploadEvent = match serde_json::from_str(body) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to deserialize upload notification, skipping");
                        self.delete_message(msg.receipt_handle()).await;
                        continue;
                    }
                };

                match self.pipeline.handle(&event).await {
                    Ok(outcome) => {
                        self.record_outcome(outcome).await;
                        self.delete_message(msg.receipt_handle()).await;
                    }
                    Err(e) => {
                        // Leave the message in the queue; the visibility
                        // timeout will redeliver it.
                        tracing::error!(
                            error = %e,
                            key = %event.name,
                            generation = event.generation,
                            "pipeline failed, message left for redelivery"
                        );
                    }
                }
            }
        }
    }

    /// Persist a photo document for processed images carrying a GPS
    /// position. Failures are logged; the source object is already gone,
    /// so redelivering the message could not succeed anyway.
    async fn record_outcome(&self, outcome: UploadOutcome) {
        let (Some(repository), UploadOutcome::Processed {
            final_url,
            thumbnail_url,
            width,
            height,
            gps: Some(gps),
            ..
        }) = (&self.photos, outcome)
        else {
            return;
        };

        let document = PhotoDocument {
            thumb_url: thumbnail_url,
            image_url: final_url,
            latitude: gps.lat,
            longitude: gps.lon,
            width: width as i32,
            height: height as i32,
        };

        match repository.add_photo(&document).await {
            Ok(id) => tracing::info!(photo_id = %id, "photo document created"),
            Err(e) => tracing::error!(error = %e, "failed to persist photo document"),
        }
    }

    async fn delete_message(&self, receipt_handle: Option<&str>) {
        let Some(receipt) = receipt_handle else {
            return;
        };
        if let Err(e) = self
            .client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt)
            .send()
            .await
        {
            tracing::error!(error = %e, "failed to delete queue message");
        }
    }
}
