//! Cloudinary Media Store Implementation
//!
//! Uploads and deletes assets through Cloudinary's signed upload API.
//! Requests are signed with SHA-256 over the sorted request parameters.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{MediaConfig, MediaError, MediaStore, UploadedAsset};

/// Public Cloudinary API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

const SIGNATURE_ALGORITHM: &str = "sha256";

/// Compute a Cloudinary request signature.
///
/// Parameters are sorted by name, joined as `name=value` pairs separated by
/// `&`, and hashed together with the API secret appended.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: Option<String>,
    secure_url: Option<String>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: Option<String>,
    error: Option<ApiErrorBody>,
}

/// Cloudinary media store
pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    api_base: String,
}

impl CloudinaryMediaStore {
    /// Create a new Cloudinary media store from explicit credentials
    pub fn new(config: MediaConfig) -> Result<Self, MediaError> {
        let cloud_name = config.cloud_name.ok_or_else(|| {
            MediaError::Configuration("CLOUDINARY_CLOUD_NAME is required".to_string())
        })?;
        let api_key = config.api_key.ok_or_else(|| {
            MediaError::Configuration("CLOUDINARY_API_KEY is required".to_string())
        })?;
        let api_secret = config.api_secret.ok_or_else(|| {
            MediaError::Configuration("CLOUDINARY_API_SECRET is required".to_string())
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            cloud_name,
            api_key,
            api_secret,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/v1_1/{}/image/{}", self.api_base, self.cloud_name, action)
    }

    fn timestamp() -> String {
        chrono::Utc::now().timestamp().to_string()
    }
}

#[async_trait::async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn upload(&self, path: &Path, folder: &str) -> Result<UploadedAsset, MediaError> {
        tracing::info!(path = %path.display(), folder, "Uploading asset to Cloudinary");

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            MediaError::Request(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let timestamp = Self::timestamp();
        let signature = sign_params(
            &[("folder", folder), ("timestamp", timestamp.as_str())],
            &self.api_secret,
        );

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature)
            .text("signature_algorithm", SIGNATURE_ALGORITHM);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Request(format!("Cloudinary upload failed: {}", e)))?;

        let status = response.status();
        let body: UploadResponse = response.json().await.map_err(|e| {
            MediaError::Response(format!("Unreadable Cloudinary upload response: {}", e))
        })?;

        if let Some(error) = body.error {
            return Err(MediaError::Response(error.message));
        }
        if !status.is_success() {
            return Err(MediaError::Response(format!(
                "Cloudinary upload returned {}",
                status
            )));
        }

        let asset = UploadedAsset {
            asset_id: body.public_id.unwrap_or_default(),
            secure_url: body.secure_url.unwrap_or_default(),
        };

        tracing::info!(asset_id = %asset.asset_id, "Cloudinary upload complete");
        Ok(asset)
    }

    async fn destroy(&self, asset_id: &str) -> Result<(), MediaError> {
        tracing::info!(asset_id, "Deleting asset from Cloudinary");

        let timestamp = Self::timestamp();
        let signature = sign_params(
            &[("public_id", asset_id), ("timestamp", timestamp.as_str())],
            &self.api_secret,
        );

        let params = [
            ("public_id", asset_id),
            ("api_key", self.api_key.as_str()),
            ("timestamp", timestamp.as_str()),
            ("signature", signature.as_str()),
            ("signature_algorithm", SIGNATURE_ALGORITHM),
        ];

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await
            .map_err(|e| MediaError::Request(format!("Cloudinary destroy failed: {}", e)))?;

        let status = response.status();
        let body: DestroyResponse = response.json().await.map_err(|e| {
            MediaError::Response(format!("Unreadable Cloudinary destroy response: {}", e))
        })?;

        if let Some(error) = body.error {
            return Err(MediaError::Response(error.message));
        }
        if !status.is_success() {
            return Err(MediaError::Response(format!(
                "Cloudinary destroy returned {}",
                status
            )));
        }

        match body.result.as_deref() {
            Some("ok") => Ok(()),
            Some("not found") => {
                tracing::warn!(asset_id, "Cloudinary asset already gone");
                Ok(())
            }
            other => Err(MediaError::Response(format!(
                "Unexpected Cloudinary destroy result: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}
