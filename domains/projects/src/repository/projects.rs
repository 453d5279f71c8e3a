//! Project repository

use chrono::{DateTime, Utc};
use portfolio_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use super::ProjectStore;
use crate::domain::entities::{Banner, NewProject, Project, ProjectUpdate};

/// All columns in the projects table, used for SELECT and RETURNING clauses.
const PROJECT_COLUMNS: &str = "\
    id, title, description, git_repo_link, project_link, \
    stack, technologies, deployed, \
    banner_asset_id, banner_url, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    title: String,
    description: String,
    git_repo_link: String,
    project_link: String,
    stack: String,
    technologies: String,
    deployed: String,
    banner_asset_id: String,
    banner_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            git_repo_link: row.git_repo_link,
            project_link: row.project_link,
            stack: row.stack,
            technologies: row.technologies,
            deployed: row.deployed,
            banner: Banner {
                asset_id: row.banner_asset_id,
                url: row.banner_url,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectStore for ProjectRepository {
    async fn create(&self, project: NewProject) -> Result<Project, RepositoryError> {
        let query = format!(
            "INSERT INTO projects \
             (title, description, git_repo_link, project_link, stack, technologies, deployed, \
              banner_asset_id, banner_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {PROJECT_COLUMNS}"
        );
        let details = &project.details;
        let created = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(&details.title)
            .bind(&details.description)
            .bind(&details.git_repo_link)
            .bind(&details.project_link)
            .bind(&details.stack)
            .bind(&details.technologies)
            .bind(&details.deployed)
            .bind(&project.banner.asset_id)
            .bind(&project.banner.url)
            .fetch_one(&self.pool)
            .await?;

        Ok(created.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project.map(Into::into))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        update: ProjectUpdate,
    ) -> Result<Option<Project>, RepositoryError> {
        // NULL parameters leave the column untouched
        let query = format!(
            "UPDATE projects SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 git_repo_link = COALESCE($4, git_repo_link), \
                 project_link = COALESCE($5, project_link), \
                 stack = COALESCE($6, stack), \
                 technologies = COALESCE($7, technologies), \
                 deployed = COALESCE($8, deployed), \
                 banner_asset_id = COALESCE($9, banner_asset_id), \
                 banner_url = COALESCE($10, banner_url), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        );
        let fields = &update.fields;
        let banner = update.banner.as_ref();
        let updated = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.git_repo_link)
            .bind(&fields.project_link)
            .bind(&fields.stack)
            .bind(&fields.technologies)
            .bind(&fields.deployed)
            .bind(banner.map(|b| b.asset_id.as_str()))
            .bind(banner.map(|b| b.url.as_str()))
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated.map(Into::into))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at, id");
        let projects = sqlx::query_as::<_, ProjectRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects.into_iter().map(Into::into).collect())
    }
}
