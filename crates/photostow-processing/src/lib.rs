//! Photostow Processing
//!
//! Image thumbnailing, EXIF GPS extraction, and the upload pipeline that
//! ties them to the object stores.

pub mod exif;
pub mod image;
pub mod pipeline;

pub use self::exif::{extract_gps, format_dms, parse_dms, read_gps, DmsParseError, RawGps};
pub use self::image::{generate_thumbnail, Thumbnail, ThumbnailError};
pub use self::pipeline::{PipelineError, UploadOutcome, UploadPipeline};
