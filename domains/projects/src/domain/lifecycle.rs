//! Project asset lifecycle
//!
//! Sequences the document store and the media store for project records:
//! upload-then-record on create, replace-then-delete-old on update, and
//! delete-asset-then-record on delete. Steps are strictly sequential and
//! never retried; a failed step fails the whole operation.
//!
//! Known gaps, accepted as-is:
//! - a store write that fails after a successful upload leaves an orphaned
//!   asset in the media store (logged at warn with its id)
//! - a record delete that fails after its banner was destroyed leaves the
//!   record pointing at a missing asset

use std::sync::Arc;

use portfolio_common::{Error, Result};
use portfolio_media::MediaStore;
use uuid::Uuid;

use crate::domain::entities::{
    Banner, BannerFile, NewProject, Project, ProjectFields, ProjectUpdate, BANNER_FOLDER,
    BANNER_REQUIRED, PROJECT_NOT_FOUND,
};
use crate::repository::ProjectStore;

fn not_found() -> Error {
    Error::NotFound(PROJECT_NOT_FOUND.to_string())
}

fn require_banner(banner: Option<&BannerFile>) -> Result<&BannerFile> {
    banner
        .filter(|file| !file.is_empty())
        .ok_or_else(|| Error::Validation(BANNER_REQUIRED.to_string()))
}

/// Coordinates project records with their hosted banner images
#[derive(Clone)]
pub struct ProjectLifecycle {
    store: Arc<dyn ProjectStore>,
    media: Arc<dyn MediaStore>,
}

impl ProjectLifecycle {
    pub fn new(store: Arc<dyn ProjectStore>, media: Arc<dyn MediaStore>) -> Self {
        Self { store, media }
    }

    /// Create a project. The banner is required and is uploaded before
    /// anything is written to the store.
    pub async fn create(
        &self,
        fields: ProjectFields,
        banner: Option<&BannerFile>,
    ) -> Result<Project> {
        let banner_file = require_banner(banner)?;
        let details = fields.into_details()?;

        let banner = self.upload_banner(banner_file).await?;

        let new_project = NewProject {
            details,
            banner: banner.clone(),
        };
        let project = self.store.create(new_project).await.inspect_err(|e| {
            tracing::warn!(
                asset_id = %banner.asset_id,
                error = %e,
                "Project insert failed after banner upload; asset is orphaned"
            );
        })?;

        tracing::info!(project_id = %project.id, asset_id = %project.banner.asset_id, "Project created");
        Ok(project)
    }

    /// Update a project, optionally replacing its banner.
    ///
    /// With a replacement the old asset is destroyed and the new one uploaded
    /// before the store write.
    pub async fn update(
        &self,
        id: Uuid,
        fields: ProjectFields,
        banner: Option<&BannerFile>,
    ) -> Result<Project> {
        fields.validate_changes()?;

        let mut update = ProjectUpdate {
            fields,
            banner: None,
        };

        if let Some(banner_file) = banner {
            let banner_file = require_banner(Some(banner_file))?;

            let existing = self.store.find_by_id(id).await?.ok_or_else(not_found)?;

            self.destroy_banner(&existing.banner).await?;
            update.banner = Some(self.upload_banner(banner_file).await?);
        }

        let replaced = update.banner.clone();
        let project = self
            .store
            .update_by_id(id, update)
            .await
            .inspect_err(|e| {
                if let Some(banner) = &replaced {
                    tracing::warn!(
                        project_id = %id,
                        asset_id = %banner.asset_id,
                        error = %e,
                        "Project update failed after banner upload; asset is orphaned"
                    );
                }
            })?
            .ok_or_else(|| {
                if let Some(banner) = &replaced {
                    tracing::warn!(
                        project_id = %id,
                        asset_id = %banner.asset_id,
                        "Project vanished during banner replacement; asset is orphaned"
                    );
                }
                not_found()
            })?;

        tracing::info!(
            project_id = %project.id,
            banner_replaced = replaced.is_some(),
            "Project updated"
        );
        Ok(project)
    }

    /// Delete a project and its banner asset
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let project = self.store.find_by_id(id).await?.ok_or_else(not_found)?;

        self.destroy_banner(&project.banner).await?;

        let deleted = self.store.delete_by_id(id).await.inspect_err(|e| {
            tracing::warn!(
                project_id = %id,
                asset_id = %project.banner.asset_id,
                error = %e,
                "Project delete failed after banner was destroyed; record points at a missing asset"
            );
        })?;
        if !deleted {
            return Err(not_found());
        }

        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }

    /// All projects, in store order
    pub async fn list(&self) -> Result<Vec<Project>> {
        Ok(self.store.find_all().await?)
    }

    /// A single project
    pub async fn get(&self, id: Uuid) -> Result<Project> {
        self.store.find_by_id(id).await?.ok_or_else(not_found)
    }

    async fn upload_banner(&self, file: &BannerFile) -> Result<Banner> {
        let asset = self
            .media
            .upload(&file.path, BANNER_FOLDER)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Banner upload failed");
                Error::Upload("Failed to upload project banner".to_string())
            })?;

        if !asset.is_usable() {
            tracing::error!(?asset, "Media store returned an unusable asset");
            return Err(Error::Upload(
                "Failed to upload project banner".to_string(),
            ));
        }

        Ok(asset.into())
    }

    async fn destroy_banner(&self, banner: &Banner) -> Result<()> {
        self.media.destroy(&banner.asset_id).await.map_err(|e| {
            tracing::error!(asset_id = %banner.asset_id, error = %e, "Banner delete failed");
            Error::Store("Failed to delete project banner".to_string())
        })
    }
}
