//! Portfolio API - AWS Lambda Runtime

use lambda_http::{run, Error};
use tower_http::trace::TraceLayer;
use tracing::info;

use portfolio_app::{build_cors_layer, connect_media, connect_store, create_app};
use portfolio_common::Config;
use portfolio_media::MediaConfig;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    info!("Initializing Portfolio API Lambda");

    let config = Config::from_env().map_err(|e| Error::from(format!("Config error: {}", e)))?;
    let media_config =
        MediaConfig::from_env().map_err(|e| Error::from(format!("Media config error: {}", e)))?;

    let store = connect_store(&config)
        .await
        .map_err(|e| Error::from(format!("Database error: {}", e)))?;
    let media =
        connect_media(media_config).map_err(|e| Error::from(format!("Media error: {}", e)))?;

    let app = create_app(&config, store, media)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.cors_allowed_origins));

    info!("Portfolio API Lambda ready to serve requests");

    run(app).await
}
