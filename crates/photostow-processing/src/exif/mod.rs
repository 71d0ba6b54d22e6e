//! EXIF GPS extraction.
//!
//! GPS positions are stored in EXIF as three rationals per axis
//! (degrees, minutes, seconds) plus a hemisphere letter. Extraction
//! formats them as a sexagesimal pair (`51:30:0.5486N 0:7:34.4504W`)
//! and parses that into signed decimal degrees.

mod dms;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{In, Reader, Tag, Value};

use photostow_core::GpsCoordinates;

pub use dms::{parse_dms, DmsParseError};

/// Raw EXIF GPS fields: degrees/minutes/seconds per axis plus the
/// hemisphere reference letters.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGps {
    pub latitude: [f64; 3],
    pub latitude_ref: char,
    pub longitude: [f64; 3],
    pub longitude_ref: char,
}

/// Read the GPS block from an image file.
///
/// Absent or malformed metadata yields `None`; failures are logged, never
/// propagated.
pub fn read_gps(path: &Path) -> Option<RawGps> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to open file for EXIF read");
            return None;
        }
    };

    let exif = match Reader::new().read_from_container(&mut BufReader::new(&file)) {
        Ok(exif) => exif,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no EXIF metadata");
            return None;
        }
    };

    let latitude = rational_triplet(&exif, Tag::GPSLatitude)?;
    let latitude_ref = hemisphere_letter(&exif, Tag::GPSLatitudeRef)?;
    let longitude = rational_triplet(&exif, Tag::GPSLongitude)?;
    let longitude_ref = hemisphere_letter(&exif, Tag::GPSLongitudeRef)?;

    Some(RawGps {
        latitude,
        latitude_ref,
        longitude,
        longitude_ref,
    })
}

fn rational_triplet(exif: &exif::Exif, tag: Tag) -> Option<[f64; 3]> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Rational(parts) if parts.len() >= 3 => Some([
            parts[0].to_f64(),
            parts[1].to_f64(),
            parts[2].to_f64(),
        ]),
        other => {
            tracing::debug!(tag = %tag, value = ?other, "unexpected GPS field shape");
            None
        }
    }
}

fn hemisphere_letter(exif: &exif::Exif, tag: Tag) -> Option<char> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Ascii(strings) => strings
            .first()
            .and_then(|s| s.first())
            .map(|b| *b as char),
        other => {
            tracing::debug!(tag = %tag, value = ?other, "unexpected GPS reference shape");
            None
        }
    }
}

/// Format raw GPS fields as the sexagesimal pair the DMS parser consumes:
/// `D:M:S{N|S} D:M:S{E|W}`.
pub fn format_dms(gps: &RawGps) -> String {
    format!(
        "{}:{}:{}{} {}:{}:{}{}",
        gps.latitude[0],
        gps.latitude[1],
        gps.latitude[2],
        gps.latitude_ref,
        gps.longitude[0],
        gps.longitude[1],
        gps.longitude[2],
        gps.longitude_ref,
    )
}

/// Decimal GPS position of an image file, or `None` when metadata is
/// absent or unparseable.
pub fn extract_gps(path: &Path) -> Option<GpsCoordinates> {
    let raw = read_gps(path)?;
    match parse_dms(&format_dms(&raw)) {
        Ok(coords) => Some(coords),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to parse GPS DMS fields");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> RawGps {
        RawGps {
            latitude: [51.0, 30.0, 0.5486],
            latitude_ref: 'N',
            longitude: [0.0, 7.0, 34.4504],
            longitude_ref: 'W',
        }
    }

    #[test]
    fn formats_dms_pair() {
        assert_eq!(format_dms(&london()), "51:30:0.5486N 0:7:34.4504W");
    }

    #[test]
    fn formatted_pair_parses_to_reference_decimal() {
        let coords = parse_dms(&format_dms(&london())).unwrap();
        assert!((coords.lat - 51.50015238888889).abs() < 1e-9);
        assert!((coords.lon - -0.12623622222222223).abs() < 1e-9);
    }

    #[test]
    fn file_without_metadata_yields_none() {
        // A bare PNG has no EXIF block at all.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.png");
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            4,
            4,
            image::Rgba([0, 0, 0, 255]),
        ));
        img.save_with_format(&path, image::ImageFormat::Png).unwrap();

        assert_eq!(read_gps(&path), None);
        assert_eq!(extract_gps(&path), None);
    }

    #[test]
    fn missing_file_yields_none() {
        assert_eq!(read_gps(Path::new("/nonexistent/file.jpg")), None);
    }
}
