//! Projects domain: portfolio projects and their hosted banner images

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Banner, BannerFile, Project, ProjectFields};
pub use domain::lifecycle::ProjectLifecycle;

// Re-export repository types
pub use repository::{InMemoryProjectStore, ProjectRepository, ProjectStore};

// Re-export API types
pub use api::routes;
pub use api::ProjectsState;
