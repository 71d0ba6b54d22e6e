//! GPS metadata round-trip tests against a real EXIF-bearing JPEG.

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, Rgba, RgbaImage};
use img_parts::ImageEXIF;

use photostow_core::{ContentKind, UploadEvent};
use photostow_processing::{extract_gps, generate_thumbnail, read_gps, UploadOutcome, UploadPipeline};
use photostow_storage::MemoryObjectStore;

const LAT: f64 = 51.50015238888889;
const LON: f64 = -0.12623622222222223;

fn push_entry(buf: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    buf.extend_from_slice(&tag.to_le_bytes());
    buf.extend_from_slice(&kind.to_le_bytes());
    buf.extend_from_slice(&count.to_le_bytes());
    buf.extend_from_slice(&value.to_le_bytes());
}

fn push_entry_bytes(buf: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: [u8; 4]) {
    buf.extend_from_slice(&tag.to_le_bytes());
    buf.extend_from_slice(&kind.to_le_bytes());
    buf.extend_from_slice(&count.to_le_bytes());
    buf.extend_from_slice(&value);
}

/// Minimal little-endian TIFF stream with a GPS IFD holding
/// `[51, 30, 0.5486] N` / `[0, 7, 34.4504] W`.
///
/// Layout: header (0..8), IFD0 with a single GPS-IFD pointer (8..26),
/// GPS IFD with four entries (26..80), latitude rationals (80..104),
/// longitude rationals (104..128).
fn gps_exif_payload() -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());

    // IFD0: one entry, the GPS IFD pointer (tag 0x8825, LONG).
    tiff.extend_from_slice(&1u16.to_le_bytes());
    push_entry(&mut tiff, 0x8825, 4, 1, 26);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    // GPS IFD: refs are inline ASCII, coordinates point at the
    // rational blocks below.
    tiff.extend_from_slice(&4u16.to_le_bytes());
    push_entry_bytes(&mut tiff, 0x0001, 2, 2, *b"N\0\0\0");
    push_entry(&mut tiff, 0x0002, 5, 3, 80);
    push_entry_bytes(&mut tiff, 0x0003, 2, 2, *b"W\0\0\0");
    push_entry(&mut tiff, 0x0004, 5, 3, 104);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    for (num, denom) in [(51u32, 1u32), (30, 1), (5486, 10000)] {
        tiff.extend_from_slice(&num.to_le_bytes());
        tiff.extend_from_slice(&denom.to_le_bytes());
    }
    for (num, denom) in [(0u32, 1u32), (7, 1), (344504, 10000)] {
        tiff.extend_from_slice(&num.to_le_bytes());
        tiff.extend_from_slice(&denom.to_le_bytes());
    }

    tiff
}

/// Encode a JPEG and attach the GPS EXIF block to it.
fn gps_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([80, 90, 100, 255]),
    ));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_to(&mut buf, image::ImageFormat::Jpeg)
        .unwrap();

    let mut jpeg = img_parts::jpeg::Jpeg::from_bytes(buf.into_inner().into()).unwrap();
    jpeg.set_exif(Some(gps_exif_payload().into()));
    let mut out = Vec::new();
    jpeg.encoder().write_to(&mut out).unwrap();
    out
}

fn write_temp(dir: &tempfile::TempDir, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, data).unwrap();
    path
}

#[test]
fn reads_decimal_coordinates_from_gps_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "london.jpg", &gps_jpeg(128, 64));

    let raw = read_gps(&path).unwrap();
    assert_eq!(raw.latitude_ref, 'N');
    assert_eq!(raw.longitude_ref, 'W');
    assert_eq!(raw.latitude, [51.0, 30.0, 0.5486]);
    assert_eq!(raw.longitude, [0.0, 7.0, 34.4504]);

    let coords = extract_gps(&path).unwrap();
    assert!((coords.lat - LAT).abs() < 1e-9);
    assert!((coords.lon - LON).abs() < 1e-9);
}

#[test]
fn gps_metadata_survives_thumbnailing() {
    let dir = tempfile::tempdir().unwrap();
    let source = gps_jpeg(128, 64);

    let thumb = generate_thumbnail(&source, ContentKind::Jpeg, 64).unwrap();
    assert_eq!((thumb.width, thumb.height), (64, 32));

    let path = write_temp(&dir, "thumb.jpg", &thumb.data);
    let coords = extract_gps(&path).expect("thumbnail lost its GPS block");
    assert!((coords.lat - LAT).abs() < 1e-9);
    assert!((coords.lon - LON).abs() < 1e-9);
}

#[tokio::test]
async fn pipeline_surfaces_gps_position_of_processed_image() {
    let source = MemoryObjectStore::new("photostow-uploads");
    let final_store = MemoryObjectStore::new("photostow-final");
    let thumbnails = MemoryObjectStore::new("photostow-thumbnails");
    let scratch = tempfile::tempdir().unwrap();

    let pipeline = UploadPipeline::new(
        Arc::new(source.clone()),
        Arc::new(final_store.clone()),
        Arc::new(thumbnails.clone()),
        64,
        scratch.path().to_path_buf(),
    );

    source.set_object("london.jpg", gps_jpeg(128, 64));
    let outcome = pipeline
        .handle(&UploadEvent {
            bucket: "photostow-uploads".to_string(),
            name: "london.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            generation: 11,
        })
        .await
        .unwrap();

    let UploadOutcome::Processed { gps: Some(gps), .. } = outcome else {
        panic!("expected Processed outcome with GPS coordinates");
    };
    assert!((gps.lat - LAT).abs() < 1e-9);
    assert!((gps.lon - LON).abs() < 1e-9);
}
