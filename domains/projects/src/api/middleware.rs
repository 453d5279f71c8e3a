//! Projects domain state

use std::sync::Arc;

use portfolio_media::MediaStore;

use crate::domain::lifecycle::ProjectLifecycle;
use crate::repository::ProjectStore;

/// Application state for the Projects domain
#[derive(Clone)]
pub struct ProjectsState {
    pub lifecycle: ProjectLifecycle,
}

impl ProjectsState {
    pub fn new(store: Arc<dyn ProjectStore>, media: Arc<dyn MediaStore>) -> Self {
        Self {
            lifecycle: ProjectLifecycle::new(store, media),
        }
    }
}
