use serde::{Deserialize, Serialize};

/// Notification that an object was written to the uploads bucket.
///
/// Delivered by the storage-event source once per object write. The
/// generation number is a per-object version token assigned by the storage
/// system on each write, so it is unique across rewrites of the same
/// logical path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadEvent {
    pub bucket: String,
    /// Object key within the source bucket.
    pub name: String,
    pub content_type: String,
    pub generation: u64,
}

impl UploadEvent {
    /// Classify the event by its declared content type.
    /// Anything other than JPEG/PNG yields `None` and is skipped upstream.
    pub fn content_kind(&self) -> Option<ContentKind> {
        ContentKind::from_content_type(&self.content_type)
    }
}

/// Accepted image content kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Jpeg,
    Png,
}

impl ContentKind {
    /// Exact content-type match; no wildcard or parameter handling.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "image/jpeg" => Some(ContentKind::Jpeg),
            "image/png" => Some(ContentKind::Png),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ContentKind::Jpeg => "jpg",
            ContentKind::Png => "png",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ContentKind::Jpeg => "image/jpeg",
            ContentKind::Png => "image/png",
        }
    }

    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            ContentKind::Jpeg => image::ImageFormat::Jpeg,
            ContentKind::Png => image::ImageFormat::Png,
        }
    }
}

/// Object name for the relocated original: `{generation}.{ext}`.
/// Keyed by generation so concurrent rewrites of the same logical path
/// never collide in the final bucket.
pub fn final_object_name(generation: u64, kind: ContentKind) -> String {
    format!("{}.{}", generation, kind.extension())
}

/// Object name for the derived thumbnail: `thumb@{width}_{final_name}`.
pub fn thumbnail_object_name(width: u32, final_name: &str) -> String {
    format!("{}@{}_{}", crate::constants::THUMBNAIL_PREFIX, width, final_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_jpeg_and_png_only() {
        assert_eq!(
            ContentKind::from_content_type("image/jpeg"),
            Some(ContentKind::Jpeg)
        );
        assert_eq!(
            ContentKind::from_content_type("image/png"),
            Some(ContentKind::Png)
        );
        assert_eq!(ContentKind::from_content_type("image/gif"), None);
        assert_eq!(ContentKind::from_content_type("text/plain"), None);
        // Exact match only; parameters and casing are not normalized.
        assert_eq!(ContentKind::from_content_type("image/JPEG"), None);
        assert_eq!(ContentKind::from_content_type("image/jpeg; q=1"), None);
    }

    #[test]
    fn derived_names_are_deterministic() {
        assert_eq!(
            final_object_name(12745649237578595, ContentKind::Jpeg),
            "12745649237578595.jpg"
        );
        assert_eq!(
            final_object_name(398575858493, ContentKind::Png),
            "398575858493.png"
        );
        assert_eq!(
            thumbnail_object_name(64, "12745649237578595.jpg"),
            "thumb@64_12745649237578595.jpg"
        );
    }

    #[test]
    fn deserializes_camel_case_notification() {
        let body = r#"{
            "bucket": "photostow-uploads",
            "name": "china/china1.jpeg",
            "contentType": "image/jpeg",
            "generation": 1681857243
        }"#;
        let event: UploadEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.bucket, "photostow-uploads");
        assert_eq!(event.name, "china/china1.jpeg");
        assert_eq!(event.content_kind(), Some(ContentKind::Jpeg));
        assert_eq!(event.generation, 1681857243);
    }
}
