use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
    Memory,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage backend error: {0}")]
    BackendError(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A single bucket of an object store.
///
/// Keys are opaque strings; URL generation is backend-specific. All
/// operations are whole-object; there is no streaming or multipart
/// surface here because every object this pipeline touches fits in
/// memory.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object's bytes.
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Store an object, returning its public URL.
    async fn upload(&self, key: &str, content_type: &str, data: Vec<u8>) -> StorageResult<String>;

    /// Remove an object. Removing a missing object is a `NotFound` error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    async fn exists(&self, key: &str) -> StorageResult<bool>;

    fn bucket(&self) -> &str;

    fn backend_type(&self) -> StorageBackend;

    /// Fetch an object into a local file.
    async fn download_to_path(&self, key: &str, path: &Path) -> StorageResult<()> {
        let data = self.download(key).await?;
        tokio::fs::write(path, data).await?;
        Ok(())
    }

    /// Store a local file under the given key, returning its public URL.
    async fn upload_file(
        &self,
        path: &Path,
        key: &str,
        content_type: &str,
    ) -> StorageResult<String> {
        let data = tokio::fs::read(path).await?;
        self.upload(key, content_type, data).await
    }
}
