//! Portfolio API composition root
//!
//! Builds the project and media stores from configuration and composes the
//! domain routers into a single application.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer, extract::DefaultBodyLimit, http::HeaderValue, routing::get,
    Router,
};
use portfolio_common::{Config, Error, StoreBackend};
use portfolio_media::{MediaConfig, MediaStore, MediaStoreFactory};
use portfolio_projects::{InMemoryProjectStore, ProjectRepository, ProjectStore, ProjectsState};
use sqlx::PgPool;
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, BoxError, ServiceBuilder};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

/// Create the main application router with all routes and middleware
pub fn create_app(
    config: &Config,
    store: Arc<dyn ProjectStore>,
    media: Arc<dyn MediaStore>,
) -> Router {
    let projects_state = ProjectsState::new(store, media);

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "Portfolio API v0.1.0" }))
        .merge(portfolio_projects::routes().with_state(projects_state))
        .layer(body_limit_layer(config.max_upload_bytes));

    with_timeout(router, Duration::from_secs(config.request_timeout_secs))
}

/// Bound request handling time. Expired requests get a 408 in the error
/// envelope.
pub fn with_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout_error))
            .layer(TimeoutLayer::new(timeout)),
    )
}

async fn handle_timeout_error(err: BoxError) -> Error {
    if err.is::<Elapsed>() {
        warn!("Request timed out");
        Error::Timeout("Request timed out".to_string())
    } else {
        Error::Internal(format!("Unhandled middleware error: {}", err))
    }
}

/// Open the configured document store. The Postgres store is migrated
/// before it is handed out.
pub async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn ProjectStore>> {
    match config.store {
        StoreBackend::Memory => {
            warn!("Using the in-memory project store; records are lost on restart");
            Ok(Arc::new(InMemoryProjectStore::new()))
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required"))?;

            let pool = PgPool::connect(database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;
            info!("Database connection established");

            sqlx::migrate!("../../migrations").run(&pool).await?;
            info!("Database migrations applied");

            Ok(Arc::new(ProjectRepository::new(pool)))
        }
    }
}

/// Build the configured media store
pub fn connect_media(config: MediaConfig) -> anyhow::Result<Arc<dyn MediaStore>> {
    let provider = config.provider.clone();
    let media = MediaStoreFactory::create(config)?;
    info!(provider = %provider, "Media store ready");
    Ok(Arc::from(media))
}

/// CORS for browser clients. No configured origins means permissive.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Request body cap; bounds multipart banner uploads
pub fn body_limit_layer(max_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_bytes)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
