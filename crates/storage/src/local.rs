use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{join_url, object_key, ObjectStorage, StorageError};

/// Writes objects below a directory that is served at `public_base_url`.
pub struct LocalDiskStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalDiskStorage {
    pub fn new(root: PathBuf, public_base_url: impl Into<String>) -> Self {
        Self {
            root,
            public_base_url: public_base_url.into(),
        }
    }

    fn io_error(path: PathBuf) -> impl FnOnce(std::io::Error) -> StorageError {
        move |source| StorageError::Io { path, source }
    }
}

#[async_trait]
impl ObjectStorage for LocalDiskStorage {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn prepare(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(Self::io_error(self.root.clone()))
    }

    async fn upload(
        &self,
        bytes: Bytes,
        original_name: &str,
        category: &str,
    ) -> Result<String, StorageError> {
        let key = object_key(category, original_name);
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(Self::io_error(parent.to_path_buf()))?;
        }
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(Self::io_error(path.clone()))?;

        tracing::debug!(key = %key, size = bytes.len(), "stored object on local disk");
        Ok(join_url(&self.public_base_url, &key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_writes_file_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDiskStorage::new(dir.path().to_path_buf(), "http://cdn.test/uploads/");
        storage.prepare().await.unwrap();

        let location = storage
            .upload(Bytes::from_static(b"jpeg-bytes"), "deluxe.jpg", "room-images")
            .await
            .unwrap();

        assert!(location.starts_with("http://cdn.test/uploads/room-images/"));
        assert!(location.ends_with("-deluxe.jpg"));

        let key = location.trim_start_matches("http://cdn.test/uploads/");
        let stored = std::fs::read(dir.path().join(key)).unwrap();
        assert_eq!(stored, b"jpeg-bytes");
    }

    #[tokio::test]
    async fn prepare_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("uploads");
        let storage = LocalDiskStorage::new(root.clone(), "http://cdn.test");

        storage.prepare().await.unwrap();
        assert!(root.is_dir());
    }
}
