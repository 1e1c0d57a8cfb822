//! Object storage for uploaded files.
//!
//! Every backend implements [`ObjectStorage`]: it receives the raw bytes, the
//! client-supplied file name and a category (a key prefix such as
//! `room-images`) and answers with the location the object can be fetched from.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use stayhub_kernel::settings::{StorageBackend, StorageSettings};
use stayhub_kernel::{InitCtx, Module};
use uuid::Uuid;

pub mod error;
pub mod http;
pub mod local;
pub mod memory;

pub use error::StorageError;
pub use http::HttpObjectStorage;
pub use local::LocalDiskStorage;
pub use memory::MemoryStorage;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Short backend name used in logs
    fn backend(&self) -> &'static str;

    /// Prepare the backend before the first upload (create directories, etc.)
    async fn prepare(&self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Persist `bytes` and return the location of the stored object.
    async fn upload(
        &self,
        bytes: Bytes,
        original_name: &str,
        category: &str,
    ) -> Result<String, StorageError>;
}

/// Build the storage client selected by `settings.backend`.
pub fn from_settings(settings: &StorageSettings) -> Result<Arc<dyn ObjectStorage>, StorageError> {
    let storage: Arc<dyn ObjectStorage> = match settings.backend {
        StorageBackend::Local => Arc::new(LocalDiskStorage::new(
            settings.root_dir.clone(),
            settings.public_base_url.clone(),
        )),
        StorageBackend::Http => {
            let endpoint = settings.endpoint.clone().ok_or_else(|| {
                StorageError::Misconfigured("storage.endpoint is required for the http backend".into())
            })?;
            Arc::new(HttpObjectStorage::new(endpoint, settings.bucket.clone())?)
        }
        StorageBackend::Memory => Arc::new(MemoryStorage::new(settings.public_base_url.clone())),
    };
    Ok(storage)
}

/// Build the object key `{category}/{uuid}-{file name}`.
///
/// Directory components of `original_name` are dropped and any character
/// outside `[A-Za-z0-9._-]` becomes `_`, so keys never escape their category.
pub fn object_key(category: &str, original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let mut name: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.trim_matches('.').is_empty() {
        name = "file".to_string();
    }

    format!("{}/{}-{}", category, Uuid::now_v7(), name)
}

/// Join a base URL and an object key with exactly one slash.
pub(crate) fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key.trim_start_matches('/'))
}

/// Core module that owns the configured storage client.
pub struct StorageModule {
    storage: Arc<dyn ObjectStorage>,
}

impl StorageModule {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> Arc<dyn ObjectStorage> {
        self.storage.clone()
    }
}

#[async_trait]
impl Module for StorageModule {
    fn name(&self) -> &'static str {
        "storage"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.storage.prepare().await?;
        tracing::info!(
            module = self.name(),
            backend = self.storage.backend(),
            "storage module initialized"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_keeps_category_and_file_name() {
        let key = object_key("room-images", "suite.jpg");
        assert!(key.starts_with("room-images/"));
        assert!(key.ends_with("-suite.jpg"));
    }

    #[test]
    fn object_key_strips_directories_and_odd_characters() {
        let key = object_key("room-images", "../../etc/pass wd?.png");
        assert!(key.starts_with("room-images/"));
        assert!(key.ends_with("-pass_wd_.png"));
        assert!(!key.contains(".."));
    }

    #[test]
    fn object_key_falls_back_for_empty_names() {
        assert!(object_key("room-images", "").ends_with("-file"));
        assert!(object_key("room-images", "dir/..").ends_with("-file"));
    }

    #[test]
    fn http_backend_requires_endpoint() {
        let settings = StorageSettings {
            backend: StorageBackend::Http,
            endpoint: None,
            ..StorageSettings::default()
        };
        assert!(matches!(
            from_settings(&settings),
            Err(StorageError::Misconfigured(_))
        ));
    }

    #[test]
    fn join_url_uses_single_slash() {
        assert_eq!(join_url("http://cdn/", "/a/b.png"), "http://cdn/a/b.png");
        assert_eq!(join_url("http://cdn", "a/b.png"), "http://cdn/a/b.png");
    }
}
