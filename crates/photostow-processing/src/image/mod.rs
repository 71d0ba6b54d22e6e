mod thumbnail;

pub use thumbnail::{generate_thumbnail, Thumbnail, ThumbnailError};
