pub mod event;
pub mod gps;
pub mod photo;

pub use event::{final_object_name, thumbnail_object_name, ContentKind, UploadEvent};
pub use gps::GpsCoordinates;
pub use photo::PhotoDocument;
