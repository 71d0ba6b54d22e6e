use serde::{Deserialize, Serialize};

/// Flat photo record persisted to the `photos` collection: one per
/// ingested image, linking the relocated original and its thumbnail to
/// the extracted GPS position and thumbnail dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoDocument {
    pub thumb_url: String,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub width: i32,
    pub height: i32,
}

impl PhotoDocument {
    /// Fixed example record used by smoke tests and the seed path.
    pub fn sample() -> Self {
        Self {
            thumb_url: "gs://photostow-dev-sample-images/china/china1.jpeg".to_string(),
            image_url: "gs://photostow-dev-sample-images/china/china1.jpeg".to_string(),
            latitude: 39.90568611111111,
            longitude: 116.39314166666668,
            width: 64,
            height: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_round_trips_through_json() {
        let doc = PhotoDocument::sample();
        let json = serde_json::to_string(&doc).unwrap();
        let back: PhotoDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn sample_carries_expected_fields() {
        let doc = PhotoDocument::sample();
        assert_eq!(doc.width, 64);
        assert_eq!(doc.height, 64);
        assert!((doc.latitude - 39.90568611111111).abs() < 1e-12);
        assert!((doc.longitude - 116.39314166666668).abs() < 1e-12);
    }
}
