//! In-memory storage implementation, used by tests and local development.

use crate::traits::{ObjectStore, StorageError, StorageResult};
use arcast_core::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::sync::RwLock;
use std::time::Duration;

struct StoredObject {
    data: Bytes,
    #[allow(dead_code)]
    content_type: String,
}

/// In-process object store backed by a `BTreeMap`.
pub struct MemoryStorage {
    objects: RwLock<BTreeMap<String, StoredObject>>,
    base_url: String,
}

impl MemoryStorage {
    pub fn new(bucket: &str) -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            base_url: format!("memory://{}", bucket),
        }
    }

    fn lock_err(e: impl std::fmt::Display) -> StorageError {
        StorageError::BackendError(format!("lock poisoned: {}", e))
    }
}

#[async_trait]
impl ObjectStore for MemoryStorage {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        overwrite: bool,
    ) -> StorageResult<()> {
        let mut objects = self.objects.write().map_err(Self::lock_err)?;

        if !overwrite && objects.contains_key(key) {
            return Err(StorageError::Conflict(key.to_string()));
        }

        objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        let objects = self.objects.read().map_err(Self::lock_err)?;
        objects
            .get(key)
            .map(|obj| obj.data.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let objects = self.objects.read().map_err(Self::lock_err)?;
        Ok(objects
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn delete(&self, keys: &[String]) -> StorageResult<()> {
        let mut objects = self.objects.write().map_err(Self::lock_err)?;
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }

    async fn signed_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let objects = self.objects.read().map_err(Self::lock_err)?;
        if !objects.contains_key(key) {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(format!(
            "{}/{}?expires_in={}",
            self.base_url,
            key,
            expires_in.as_secs()
        ))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let objects = self.objects.read().map_err(Self::lock_err)?;
        Ok(objects.contains_key(key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = MemoryStorage::new("models");
        store
            .put("a.glb", Bytes::from_static(b"bytes"), "model/gltf-binary", false)
            .await
            .unwrap();

        assert_eq!(store.get("a.glb").await.unwrap(), Bytes::from_static(b"bytes"));
        assert!(store.exists("a.glb").await.unwrap());
    }

    #[tokio::test]
    async fn put_without_overwrite_conflicts() {
        let store = MemoryStorage::new("models");
        store
            .put("a.glb", Bytes::from_static(b"one"), "model/gltf-binary", false)
            .await
            .unwrap();

        let err = store
            .put("a.glb", Bytes::from_static(b"two"), "model/gltf-binary", false)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        // Original untouched
        assert_eq!(store.get("a.glb").await.unwrap(), Bytes::from_static(b"one"));

        // Overwrite allowed when requested
        store
            .put("a.glb", Bytes::from_static(b"two"), "model/gltf-binary", true)
            .await
            .unwrap();
        assert_eq!(store.get("a.glb").await.unwrap(), Bytes::from_static(b"two"));
    }

    #[tokio::test]
    async fn list_filters_by_prefix() {
        let store = MemoryStorage::new("models");
        for key in ["1_a.glb", "1_a.usdz", "2_b.stl"] {
            store
                .put(key, Bytes::from_static(b"x"), "application/octet-stream", false)
                .await
                .unwrap();
        }

        assert_eq!(store.list("1_a").await.unwrap().len(), 2);
        assert_eq!(store.list("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn delete_removes_keys_and_tolerates_missing() {
        let store = MemoryStorage::new("models");
        store
            .put("a.glb", Bytes::from_static(b"x"), "model/gltf-binary", false)
            .await
            .unwrap();

        store
            .delete(&["a.glb".to_string(), "missing.glb".to_string()])
            .await
            .unwrap();
        assert!(!store.exists("a.glb").await.unwrap());
    }

    #[tokio::test]
    async fn signed_url_requires_existing_object() {
        let store = MemoryStorage::new("models");
        let err = store
            .signed_url("nope.glb", Duration::from_secs(3600))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
