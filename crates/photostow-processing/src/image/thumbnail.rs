use std::io::Cursor;

use image::{DynamicImage, GenericImageView};
use img_parts::ImageEXIF;
use thiserror::Error;

use photostow_core::ContentKind;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("target width must be non-zero")]
    ZeroWidth,
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode thumbnail: {0}")]
    Encode(image::ImageError),
}

/// A generated thumbnail with its final encoded dimensions.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Height for a fixed target width, preserving the source aspect ratio.
fn scaled_height(orig_width: u32, orig_height: u32, target_width: u32) -> u32 {
    let aspect_ratio = orig_height as f32 / orig_width as f32;
    let h = (target_width as f32 * aspect_ratio).round() as u32;
    h.max(1)
}

/// Select appropriate filter type based on resize ratio
fn select_filter(
    orig_width: u32,
    orig_height: u32,
    new_width: u32,
    new_height: u32,
) -> image::imageops::FilterType {
    let width_ratio = orig_width as f32 / new_width as f32;
    let height_ratio = orig_height as f32 / new_height as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        image::imageops::FilterType::Triangle
    } else if max_ratio > 1.5 {
        image::imageops::FilterType::CatmullRom
    } else {
        image::imageops::FilterType::Lanczos3
    }
}

/// Generate a fixed-width, aspect-preserving thumbnail in the source
/// format. Sources narrower than the target are scaled up, matching the
/// behavior of the original uploader.
///
/// The source EXIF segment (JPEG APP1 / PNG eXIf chunk) is carried over
/// to the thumbnail, since re-encoding through the codec drops it.
pub fn generate_thumbnail(
    data: &[u8],
    kind: ContentKind,
    target_width: u32,
) -> Result<Thumbnail, ThumbnailError> {
    if target_width == 0 {
        return Err(ThumbnailError::ZeroWidth);
    }

    let img = image::load_from_memory_with_format(data, kind.image_format())
        .map_err(ThumbnailError::Decode)?;

    let (orig_width, orig_height) = img.dimensions();
    let target_height = scaled_height(orig_width, orig_height, target_width);
    let filter = select_filter(orig_width, orig_height, target_width, target_height);
    let resized = img.resize_exact(target_width, target_height, filter);

    let mut buf = Cursor::new(Vec::new());
    match kind {
        // JPEG cannot encode an alpha channel.
        ContentKind::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8())
            .write_to(&mut buf, image::ImageFormat::Jpeg)
            .map_err(ThumbnailError::Encode)?,
        ContentKind::Png => resized
            .write_to(&mut buf, image::ImageFormat::Png)
            .map_err(ThumbnailError::Encode)?,
    }

    let encoded = carry_exif(data, buf.into_inner(), kind);

    Ok(Thumbnail {
        data: encoded,
        width: target_width,
        height: target_height,
    })
}

/// Copy the EXIF segment from the source encoding onto the thumbnail
/// encoding. Best effort: sources without metadata, or container parse
/// failures, leave the thumbnail as encoded.
fn carry_exif(source: &[u8], thumbnail: Vec<u8>, kind: ContentKind) -> Vec<u8> {
    match kind {
        ContentKind::Jpeg => {
            let parsed = (
                img_parts::jpeg::Jpeg::from_bytes(source.to_vec().into()),
                img_parts::jpeg::Jpeg::from_bytes(thumbnail.clone().into()),
            );
            if let (Ok(src), Ok(mut out)) = parsed {
                if let Some(exif) = src.exif() {
                    out.set_exif(Some(exif));
                    let mut rewritten = Vec::new();
                    if out.encoder().write_to(&mut rewritten).is_ok() {
                        return rewritten;
                    }
                }
            }
            thumbnail
        }
        ContentKind::Png => {
            let parsed = (
                img_parts::png::Png::from_bytes(source.to_vec().into()),
                img_parts::png::Png::from_bytes(thumbnail.clone().into()),
            );
            if let (Ok(src), Ok(mut out)) = parsed {
                if let Some(exif) = src.exif() {
                    out.set_exif(Some(exif));
                    let mut rewritten = Vec::new();
                    if out.encoder().write_to(&mut rewritten).is_ok() {
                        return rewritten;
                    }
                }
            }
            thumbnail
        }
    }
}
