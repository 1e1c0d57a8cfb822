use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::{join_url, object_key, ObjectStorage, StorageError};

/// Keeps objects in process memory. Used by tests and throwaway local runs.
pub struct MemoryStorage {
    public_base_url: String,
    objects: RwLock<BTreeMap<String, Bytes>>,
}

impl MemoryStorage {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Fetch an object by the location returned from `upload`.
    pub async fn get(&self, location: &str) -> Option<Bytes> {
        let prefix = join_url(&self.public_base_url, "");
        let key = location.strip_prefix(&prefix)?;
        self.objects.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn upload(
        &self,
        bytes: Bytes,
        original_name: &str,
        category: &str,
    ) -> Result<String, StorageError> {
        let key = object_key(category, original_name);
        let location = join_url(&self.public_base_url, &key);
        self.objects.write().await.insert(key, bytes);
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn uploaded_objects_can_be_read_back() {
        let storage = MemoryStorage::new("memory://bucket");
        assert!(storage.is_empty().await);

        let location = storage
            .upload(Bytes::from_static(b"png"), "view.png", "room-images")
            .await
            .unwrap();

        assert!(location.starts_with("memory://bucket/room-images/"));
        assert_eq!(storage.len().await, 1);
        assert_eq!(storage.get(&location).await.unwrap(), Bytes::from_static(b"png"));
        assert!(storage.get("memory://bucket/missing").await.is_none());
    }
}
