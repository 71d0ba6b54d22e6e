use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::traits::{ObjectStore, StorageBackend, StorageError, StorageResult};

/// Filesystem-backed object store for development and tests.
///
/// Objects live under `{root}/{bucket}/{key}`. Keys may contain `/`
/// separators; parent directories are created on upload.
#[derive(Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    bucket: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, bucket: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            bucket: bucket.into(),
        }
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(&self.bucket).join(key)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.object_path(key);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::DownloadFailed(e.to_string())),
        }
    }

    async fn upload(&self, key: &str, _content_type: &str, data: Vec<u8>) -> StorageResult<String> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        }
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        tracing::debug!(bucket = %self.bucket, key = %key, "local upload successful");
        Ok(format!("file://{}", path.display()))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.object_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::DeleteFailed(e.to_string())),
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(tokio::fs::try_exists(self.object_path(key)).await?)
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }

    async fn download_to_path(&self, key: &str, path: &Path) -> StorageResult<()> {
        let source = self.object_path(key);
        match tokio::fs::copy(&source, path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::DownloadFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_download_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path(), "final");

        let url = store
            .upload("123.jpg", "image/jpeg", b"jpeg bytes".to_vec())
            .await
            .unwrap();
        assert!(url.starts_with("file://"));
        assert!(store.exists("123.jpg").await.unwrap());

        let data = store.download("123.jpg").await.unwrap();
        assert_eq!(data, b"jpeg bytes");

        store.delete("123.jpg").await.unwrap();
        assert!(!store.exists("123.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn nested_keys_create_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path(), "uploads");

        store
            .upload("china/china1.jpeg", "image/jpeg", vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(store.download("china/china1.jpeg").await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path(), "uploads");

        assert!(matches!(
            store.download("nope.png").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("nope.png").await,
            Err(StorageError::NotFound(_))
        ));
    }
}
