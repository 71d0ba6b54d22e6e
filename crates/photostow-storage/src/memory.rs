//! In-memory object store used as a fake in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::traits::{ObjectStore, StorageBackend, StorageError, StorageResult};

/// Object store that keeps everything in a HashMap. Cloning shares the
/// underlying map, so a test can hold a handle while the pipeline owns
/// another.
#[derive(Clone)]
pub struct MemoryObjectStore {
    bucket: String,
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed an object directly.
    pub fn set_object(&self, key: &str, data: Vec<u8>) {
        self.objects.lock().unwrap().insert(key.to_string(), data);
    }

    pub fn has_object(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    /// Object bytes, for test assertions.
    pub fn object_data(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn upload(&self, key: &str, _content_type: &str, data: Vec<u8>) -> StorageResult<String> {
        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(format!("https://example.com/{}/{}", self.bucket, key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.objects
            .lock()
            .unwrap()
            .remove(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn behaves_like_an_object_store() {
        let store = MemoryObjectStore::new("thumbnails");

        let url = store
            .upload("thumb@64_9.png", "image/png", vec![0xAA])
            .await
            .unwrap();
        assert_eq!(url, "https://example.com/thumbnails/thumb@64_9.png");
        assert!(store.exists("thumb@64_9.png").await.unwrap());
        assert_eq!(store.download("thumb@64_9.png").await.unwrap(), vec![0xAA]);

        store.delete("thumb@64_9.png").await.unwrap();
        assert!(matches!(
            store.download("thumb@64_9.png").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryObjectStore::new("uploads");
        let handle = store.clone();

        store.set_object("a.jpg", vec![1]);
        assert!(handle.has_object("a.jpg"));
        handle.delete("a.jpg").await.unwrap();
        assert_eq!(store.object_count(), 0);
    }
}
