//! Mock Media Store Implementation
//!
//! Programmable in-process media host for tests and local development:
//! - `MockMediaStore`: records every call in order
//! - `MockMediaBehavior`: controls upload replies and failures

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::{MediaError, MediaStore, UploadedAsset};

/// Base URL used for generated asset URLs
pub const MOCK_MEDIA_BASE_URL: &str = "https://mock-media.example.com";

/// How the mock answers an upload
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MockUpload {
    /// Generate a fresh asset id and URL per upload
    #[default]
    Generate,
    /// Answer every upload with this asset
    Reply(UploadedAsset),
    /// Succeed with an empty id and URL
    Empty,
    /// Fail the upload
    Fail,
}

/// Programmable behavior for the mock media store
#[derive(Debug, Clone, Default)]
pub struct MockMediaBehavior {
    pub upload: Arc<RwLock<MockUpload>>,
    pub fail_destroy: Arc<RwLock<bool>>,
}

impl MockMediaBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the upload outcome
    pub fn set_upload(&self, upload: MockUpload) {
        *self.upload.write().unwrap() = upload;
    }

    /// Configure whether destroy calls fail
    pub fn set_fail_destroy(&self, fail: bool) {
        *self.fail_destroy.write().unwrap() = fail;
    }

    /// Reset to default behavior
    pub fn reset(&self) {
        *self.upload.write().unwrap() = MockUpload::Generate;
        *self.fail_destroy.write().unwrap() = false;
    }

    pub fn get_upload(&self) -> MockUpload {
        self.upload.read().unwrap().clone()
    }

    pub fn get_fail_destroy(&self) -> bool {
        *self.fail_destroy.read().unwrap()
    }
}

/// A recorded media call for test assertions
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    Upload {
        path: PathBuf,
        folder: String,
        /// Size of the file at the time of the upload, if it existed
        size_bytes: Option<u64>,
    },
    Destroy {
        asset_id: String,
    },
}

/// Mock media store with programmable behavior
#[derive(Debug, Clone, Default)]
pub struct MockMediaStore {
    behavior: Arc<MockMediaBehavior>,
    history: Arc<Mutex<Vec<MediaCall>>>,
    counter: Arc<AtomicU64>,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(behavior: Arc<MockMediaBehavior>) -> Self {
        Self {
            behavior,
            ..Self::default()
        }
    }

    /// Get the shared behavior for configuration
    pub fn behavior(&self) -> &Arc<MockMediaBehavior> {
        &self.behavior
    }

    /// Get recorded calls, oldest first
    pub fn calls(&self) -> Vec<MediaCall> {
        self.history.lock().unwrap().clone()
    }

    /// Asset ids passed to `destroy`, oldest first
    pub fn destroyed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MediaCall::Destroy { asset_id } => Some(asset_id),
                MediaCall::Upload { .. } => None,
            })
            .collect()
    }

    /// Number of upload calls
    pub fn upload_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, MediaCall::Upload { .. }))
            .count()
    }

    /// Clear history
    pub fn reset_history(&self) {
        self.history.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(&self, path: &Path, folder: &str) -> Result<UploadedAsset, MediaError> {
        let size_bytes = tokio::fs::metadata(path).await.ok().map(|m| m.len());
        self.history.lock().unwrap().push(MediaCall::Upload {
            path: path.to_path_buf(),
            folder: folder.to_string(),
            size_bytes,
        });

        match self.behavior.get_upload() {
            MockUpload::Generate => {
                let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
                let asset_id = format!("{}/mock-{}", folder, n);
                tracing::info!(asset_id = %asset_id, "Mock media: stored upload");
                Ok(UploadedAsset {
                    secure_url: format!("{}/{}", MOCK_MEDIA_BASE_URL, asset_id),
                    asset_id,
                })
            }
            MockUpload::Reply(asset) => Ok(asset),
            MockUpload::Empty => Ok(UploadedAsset {
                asset_id: String::new(),
                secure_url: String::new(),
            }),
            MockUpload::Fail => Err(MediaError::Response("Mock upload failure".to_string())),
        }
    }

    async fn destroy(&self, asset_id: &str) -> Result<(), MediaError> {
        self.history.lock().unwrap().push(MediaCall::Destroy {
            asset_id: asset_id.to_string(),
        });

        if self.behavior.get_fail_destroy() {
            return Err(MediaError::Response("Mock destroy failure".to_string()));
        }

        tracing::info!(asset_id, "Mock media: destroyed asset");
        Ok(())
    }
}
