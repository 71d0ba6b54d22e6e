//! Photostow Core
//!
//! Shared domain models, configuration, and constants for the photo
//! ingestion pipeline. This crate performs no I/O.

pub mod config;
pub mod constants;
pub mod models;

pub use config::Config;
pub use models::{
    final_object_name, thumbnail_object_name, ContentKind, GpsCoordinates, PhotoDocument,
    UploadEvent,
};
