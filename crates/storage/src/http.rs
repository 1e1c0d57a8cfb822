use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;

use crate::{join_url, object_key, ObjectStorage, StorageError};

/// Stores objects with plain `PUT {endpoint}/{bucket}/{key}` requests.
///
/// Works against S3-compatible gateways that accept unsigned writes to the
/// bucket (MinIO with an upload policy, or an authenticating proxy in front of
/// the store). The returned location is the object URL itself.
pub struct HttpObjectStorage {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
}

impl HttpObjectStorage {
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            bucket: bucket.into(),
        })
    }
}

/// Content type derived from the file extension; unknown types are sent as
/// opaque bytes.
fn content_type_for(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    fn backend(&self) -> &'static str {
        "http"
    }

    async fn upload(
        &self,
        bytes: Bytes,
        original_name: &str,
        category: &str,
    ) -> Result<String, StorageError> {
        let key = object_key(category, original_name);
        let url = join_url(&join_url(&self.endpoint, &self.bucket), &key);

        let response = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, content_type_for(&key))
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(key = %key, status = status.as_u16(), "object store rejected upload");
            return Err(StorageError::Rejected {
                key,
                status: status.as_u16(),
            });
        }

        tracing::debug!(key = %key, "stored object over http");
        Ok(url)
    }
}
