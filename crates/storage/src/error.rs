use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by object storage backends
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to write object to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("object store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("object store rejected '{key}' with status {status}")]
    Rejected { key: String, status: u16 },

    #[error("storage misconfigured: {0}")]
    Misconfigured(String),
}
