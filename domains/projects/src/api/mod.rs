//! API layer for the Projects domain
//!
//! Contains HTTP handlers, routes, the form extractor and domain state.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use extractors::ProjectForm;
pub use middleware::ProjectsState;
pub use routes::routes;
