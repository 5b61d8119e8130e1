// Blob store adapters for interview documents

pub mod drive;
pub mod local;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::{BlobBackend, TalentMapConfig};

pub use drive::DriveBlobStore;
pub use local::LocalBlobStore;

/// Durable reference to an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("document storage unreachable: {0}")]
    Connectivity(String),

    #[error("document storage rejected the credentials: {0}")]
    Unauthorized(String),

    #[error("document storage configuration error: {0}")]
    Configuration(String),

    #[error("unexpected document storage response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<reqwest::Error> for BlobError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status.as_u16() == 401 || status.as_u16() == 403 => {
                BlobError::Unauthorized(err.to_string())
            }
            _ if err.is_decode() => BlobError::InvalidResponse(err.to_string()),
            _ => BlobError::Connectivity(err.to_string()),
        }
    }
}

/// Binary document storage returning a durable link per upload.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        suggested_name: &str,
        content_type: &str,
        parent_folder: Option<String>,
    ) -> Result<BlobRef, BlobError>;
}

/// Builds the blob store selected by the configuration.
pub fn from_config(config: &TalentMapConfig) -> Result<Arc<dyn BlobStore>, BlobError> {
    match config.blob.backend {
        BlobBackend::Local => Ok(Arc::new(LocalBlobStore::new(&config.blob.local_dir))),
        BlobBackend::Drive => {
            let token = config
                .google
                .resolve_access_token()
                .map_err(|e| BlobError::Unauthorized(e.to_string()))?;
            Ok(Arc::new(DriveBlobStore::new(&config.blob.api_base, token)?))
        }
    }
}
