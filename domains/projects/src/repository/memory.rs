//! In-memory project store
//!
//! Keeps records in insertion order behind a lock. Used by tests and by
//! the local server when `PROJECT_STORE=memory`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use portfolio_common::RepositoryError;
use uuid::Uuid;

use super::ProjectStore;
use crate::domain::entities::{NewProject, Project, ProjectUpdate};

#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectStore {
    records: Arc<RwLock<Vec<Project>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of a stored record
    pub fn get(&self, id: Uuid) -> Option<Project> {
        self.read().iter().find(|p| p.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Connection(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    /// Enforce the same non-empty column constraints as the Postgres schema
    fn check_constraints(project: &Project) -> Result<(), RepositoryError> {
        let columns = [
            ("title", &project.title),
            ("description", &project.description),
            ("git_repo_link", &project.git_repo_link),
            ("project_link", &project.project_link),
            ("stack", &project.stack),
            ("technologies", &project.technologies),
            ("deployed", &project.deployed),
            ("banner_asset_id", &project.banner.asset_id),
            ("banner_url", &project.banner.url),
        ];
        match columns.iter().find(|(_, value)| value.is_empty()) {
            Some((column, _)) => Err(RepositoryError::InvalidData(format!(
                "{} must not be empty",
                column
            ))),
            None => Ok(()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Project>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Project>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn create(&self, project: NewProject) -> Result<Project, RepositoryError> {
        self.check_available()?;

        let now = Utc::now();
        let NewProject { details, banner } = project;
        let record = Project {
            id: Uuid::new_v4(),
            title: details.title,
            description: details.description,
            git_repo_link: details.git_repo_link,
            project_link: details.project_link,
            stack: details.stack,
            technologies: details.technologies,
            deployed: details.deployed,
            banner,
            created_at: now,
            updated_at: now,
        };
        Self::check_constraints(&record)?;

        self.write().push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        self.check_available()?;
        Ok(self.get(id))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        update: ProjectUpdate,
    ) -> Result<Option<Project>, RepositoryError> {
        self.check_available()?;

        let mut records = self.write();
        let Some(record) = records.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        let mut updated = record.clone();
        update.apply_to(&mut updated);
        Self::check_constraints(&updated)?;

        *record = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.check_available()?;

        let mut records = self.write();
        let before = records.len();
        records.retain(|p| p.id != id);
        Ok(records.len() < before)
    }

    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError> {
        self.check_available()?;
        Ok(self.read().clone())
    }
}
