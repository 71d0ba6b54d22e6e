//! Photostow Storage
//!
//! Bucket-scoped object store abstraction with S3, local-filesystem, and
//! in-memory backends. Each store instance is bound to exactly one bucket;
//! the pipeline holds one store per destination.

mod traits;

#[cfg(feature = "storage-local")]
mod local;
mod memory;
#[cfg(feature = "storage-s3")]
mod s3;

pub use traits::{ObjectStore, StorageBackend, StorageError, StorageResult};

#[cfg(feature = "storage-local")]
pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;
#[cfg(feature = "storage-s3")]
pub use s3::S3ObjectStore;
