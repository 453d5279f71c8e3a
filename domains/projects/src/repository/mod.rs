//! Repository implementations for the Projects domain
//!
//! `ProjectStore` is the document-store seam the lifecycle depends on.
//! `ProjectRepository` backs it with Postgres; `InMemoryProjectStore` keeps
//! records in process for tests and local runs.

pub mod memory;
pub mod projects;

use portfolio_common::RepositoryError;
use uuid::Uuid;

use crate::domain::entities::{NewProject, Project, ProjectUpdate};

pub use memory::InMemoryProjectStore;
pub use projects::ProjectRepository;

/// Document store holding project records
#[async_trait::async_trait]
pub trait ProjectStore: Send + Sync {
    /// Persist a new record; the store generates its id
    async fn create(&self, project: NewProject) -> Result<Project, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError>;

    /// Apply a partial update and return the record as stored afterwards,
    /// or `None` when no record has this id
    async fn update_by_id(
        &self,
        id: Uuid,
        update: ProjectUpdate,
    ) -> Result<Option<Project>, RepositoryError>;

    /// Returns whether a record was removed
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError>;
}
