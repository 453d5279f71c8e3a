//! Postgres project store tests
//!
//! Need a reachable database: set `TEST_DATABASE_URL` (or `DATABASE_URL`)
//! and run with `--ignored`.

#![allow(dead_code)]

mod common;

use anyhow::Result;
use portfolio_projects::domain::entities::{
    Banner, NewProject, ProjectDetails, ProjectFields, ProjectUpdate,
};
use portfolio_common::RepositoryError;
use portfolio_projects::{ProjectRepository, ProjectStore};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::TestConfig;

async fn repository() -> Result<ProjectRepository> {
    let config = TestConfig::from_env();
    let url = config
        .database_url
        .ok_or_else(|| anyhow::anyhow!("TEST_DATABASE_URL or DATABASE_URL must be set"))?;

    let pool = PgPool::connect(&url).await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;
    Ok(ProjectRepository::new(pool))
}

fn new_project(title: &str) -> NewProject {
    NewProject {
        details: ProjectDetails {
            title: title.to_string(),
            description: "B".to_string(),
            git_repo_link: "g".to_string(),
            project_link: "p".to_string(),
            stack: "MERN".to_string(),
            technologies: "React".to_string(),
            deployed: "Yes".to_string(),
        },
        banner: Banner {
            asset_id: format!("PORTFOLIO PROJECT IMAGES/{}", Uuid::new_v4()),
            url: "http://cdn/x1".to_string(),
        },
    }
}

#[tokio::test]
#[ignore = "requires a Postgres database"]
async fn test_project_round_trip() -> Result<()> {
    let repo = repository().await?;

    let created = repo.create(new_project("Postgres round trip")).await?;
    assert_eq!(created.title, "Postgres round trip");
    assert_eq!(created.banner.url, "http://cdn/x1");

    let found = repo.find_by_id(created.id).await?;
    assert_eq!(found.as_ref(), Some(&created));

    let update = ProjectUpdate {
        fields: ProjectFields {
            deployed: Some("No".to_string()),
            ..ProjectFields::default()
        },
        banner: Some(Banner {
            asset_id: "replacement".to_string(),
            url: "http://cdn/x2".to_string(),
        }),
    };
    let updated = repo
        .update_by_id(created.id, update)
        .await?
        .expect("record exists");
    assert_eq!(updated.deployed, "No");
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.banner.asset_id, "replacement");
    assert!(updated.updated_at >= created.updated_at);

    let listed = repo.find_all().await?;
    assert!(listed.iter().any(|p| p.id == created.id));

    assert!(repo.delete_by_id(created.id).await?);
    assert!(!repo.delete_by_id(created.id).await?);
    assert!(repo.find_by_id(created.id).await?.is_none());
    Ok(())
}

#[tokio::test]
#[ignore = "requires a Postgres database"]
async fn test_missing_records() -> Result<()> {
    let repo = repository().await?;
    let id = Uuid::new_v4();

    assert!(repo.find_by_id(id).await?.is_none());
    assert!(repo
        .update_by_id(id, ProjectUpdate::default())
        .await?
        .is_none());
    Ok(())
}

#[tokio::test]
#[ignore = "requires a Postgres database"]
async fn test_blank_columns_violate_constraints() -> Result<()> {
    let repo = repository().await?;

    let err = repo.create(new_project("")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidData(_)));

    let created = repo.create(new_project("Constraint check")).await?;
    let update = ProjectUpdate {
        fields: ProjectFields {
            stack: Some(String::new()),
            ..ProjectFields::default()
        },
        banner: None,
    };
    let err = repo.update_by_id(created.id, update).await.unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidData(_)));

    let stored = repo.find_by_id(created.id).await?;
    assert_eq!(stored.map(|p| p.stack), Some("MERN".to_string()));

    repo.delete_by_id(created.id).await?;
    Ok(())
}
