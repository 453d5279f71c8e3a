//! Portfolio Media Service
//!
//! Hosts binary assets (project banners) outside the document store:
//! - Cloudinary integration for production uploads and deletions
//! - Mock media store for testing and development
//! - Configurable provider and credentials, loaded once at startup

pub mod cloudinary;
pub mod mock;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Media configuration error: {0}")]
    Configuration(String),

    #[error("Media request error: {0}")]
    Request(String),

    #[error("Media response error: {0}")]
    Response(String),
}

/// Identifier and retrieval URL of an uploaded asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub asset_id: String,
    pub secure_url: String,
}

impl UploadedAsset {
    /// Whether the media host returned something a record can point at
    pub fn is_usable(&self) -> bool {
        !self.asset_id.is_empty() && !self.secure_url.is_empty()
    }
}

/// Media service configuration
#[derive(Clone)]
pub struct MediaConfig {
    /// Media provider (cloudinary, mock)
    pub provider: String,
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    /// Cloudinary API base URL
    pub api_base: String,
}

impl std::fmt::Debug for MediaConfig {
    #[mutants::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaConfig")
            .field("provider", &self.provider)
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[redacted]"))
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl MediaConfig {
    /// Create media config from environment variables
    pub fn from_env() -> Result<Self, MediaError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create media config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MediaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = lookup("MEDIA_PROVIDER").unwrap_or_else(|| "cloudinary".to_string());
        let api_base = lookup("CLOUDINARY_API_BASE")
            .unwrap_or_else(|| cloudinary::DEFAULT_API_BASE.to_string());

        Ok(Self {
            provider,
            cloud_name: lookup("CLOUDINARY_CLOUD_NAME").filter(|v| !v.is_empty()),
            api_key: lookup("CLOUDINARY_API_KEY").filter(|v| !v.is_empty()),
            api_secret: lookup("CLOUDINARY_API_SECRET").filter(|v| !v.is_empty()),
            api_base,
        })
    }
}

/// Object store for binary assets
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload the file at `path` under the logical `folder`
    async fn upload(&self, path: &Path, folder: &str) -> Result<UploadedAsset, MediaError>;

    /// Delete a previously uploaded asset
    async fn destroy(&self, asset_id: &str) -> Result<(), MediaError>;
}

/// Factory for creating MediaStore implementations
pub struct MediaStoreFactory;

impl MediaStoreFactory {
    pub fn create(config: MediaConfig) -> Result<Box<dyn MediaStore>, MediaError> {
        match config.provider.as_str() {
            "cloudinary" => {
                tracing::info!("Creating Cloudinary media store");
                Ok(Box::new(cloudinary::CloudinaryMediaStore::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock media store");
                Ok(Box::new(mock::MockMediaStore::new()))
            }
            provider => Err(MediaError::Configuration(format!(
                "Unknown media provider: {}. Supported providers: cloudinary, mock",
                provider
            ))),
        }
    }
}
