//! Project management API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use portfolio_common::Result;
use serde::Serialize;

use crate::api::extractors::ProjectForm;
use crate::api::middleware::ProjectsState;
use crate::domain::entities::{parse_project_id, Project};

/// Envelope for responses carrying a single project
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub project: Project,
}

/// Envelope for the project listing
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub success: bool,
    pub projects: Vec<Project>,
}

/// Envelope for responses with only a message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Create a project from a multipart form with a `projectBanner` file
pub async fn add_project(
    State(state): State<ProjectsState>,
    form: ProjectForm,
) -> Result<(StatusCode, Json<ProjectResponse>)> {
    let banner = form.banner();
    let project = state.lifecycle.create(form.fields, banner.as_ref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse {
            success: true,
            message: Some("New Project Added!".to_string()),
            project,
        }),
    ))
}

/// Update a project, replacing its banner when a new one is attached
pub async fn update_project(
    State(state): State<ProjectsState>,
    Path(id): Path<String>,
    form: ProjectForm,
) -> Result<Json<ProjectResponse>> {
    let id = parse_project_id(&id)?;
    let banner = form.banner();
    let project = state
        .lifecycle
        .update(id, form.fields, banner.as_ref())
        .await?;

    Ok(Json(ProjectResponse {
        success: true,
        message: Some("Project Updated!".to_string()),
        project,
    }))
}

/// Delete a project and its banner
pub async fn delete_project(
    State(state): State<ProjectsState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_project_id(&id)?;
    state.lifecycle.delete(id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Project Deleted!".to_string(),
    }))
}

/// List every project
pub async fn list_projects(State(state): State<ProjectsState>) -> Result<Json<ProjectListResponse>> {
    let projects = state.lifecycle.list().await?;

    Ok(Json(ProjectListResponse {
        success: true,
        projects,
    }))
}

/// Get a single project by ID
pub async fn get_project(
    State(state): State<ProjectsState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>> {
    let id = parse_project_id(&id)?;
    let project = state.lifecycle.get(id).await?;

    Ok(Json(ProjectResponse {
        success: true,
        message: None,
        project,
    }))
}
