//! Route definitions for Projects domain API

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::projects;
use super::middleware::ProjectsState;

/// Create all Projects domain API routes
pub fn routes() -> Router<ProjectsState> {
    Router::new()
        .route("/api/v1/project/add", post(projects::add_project))
        .route("/api/v1/project/update/{id}", put(projects::update_project))
        .route("/api/v1/project/delete/{id}", delete(projects::delete_project))
        .route("/api/v1/project/getall", get(projects::list_projects))
        .route("/api/v1/project/get/{id}", get(projects::get_project))
}
