use serde::{Deserialize, Serialize};

/// Geographic position in signed decimal degrees.
/// South latitudes and west longitudes are negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsCoordinates {
    pub lat: f64,
    pub lon: f64,
}

impl GpsCoordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}
