//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config. Media host credentials live
//! in `portfolio_media::MediaConfig`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Which document store backs the project records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow::anyhow!(
                "Unknown project store: {}. Supported stores: postgres, memory",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Document store backend
    pub store: StoreBackend,

    /// Database connection URL (required for the postgres store)
    pub database_url: Option<String>,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: usize,

    /// Allowed CORS origins; empty means permissive
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store: StoreBackend = lookup("PROJECT_STORE")
            .unwrap_or_else(|| "postgres".to_string())
            .parse()?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err(anyhow::anyhow!("DATABASE_URL is required"));
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            store,
            database_url,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "portfolio=debug".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .and_then(|m| m.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
            cors_allowed_origins,
        })
    }
}
