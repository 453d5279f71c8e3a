//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests:
//! - An application wired to the in-memory project store and mock media store
//! - Multipart request builders
//! - Response helpers

use std::env;
use std::sync::{Arc, Once};

use axum::{
    body::Body,
    http::{Method, Request, Response},
    Router,
};
use portfolio_common::Config;
use portfolio_media::mock::MockMediaStore;
use portfolio_projects::InMemoryProjectStore;
use serde_json::Value;

static INIT: Once = Once::new();

const BOUNDARY: &str = "PortfolioIntegrationBoundary";

/// Test environment configuration
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub database_url: Option<String>,
}

impl TestConfig {
    pub fn from_env() -> Self {
        INIT.call_once(|| {
            dotenvy::from_filename(".env.test").ok();
            dotenvy::dotenv().ok();
        });

        Self {
            database_url: env::var("TEST_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .ok(),
        }
    }
}

/// Application under test with handles on both test doubles
pub struct TestApp {
    pub config: Config,
    pub store: InMemoryProjectStore,
    pub media: MockMediaStore,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_lookup(|_| None)
    }

    /// Build with extra configuration variables on top of the memory store
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config::from_lookup(|key| match key {
            "PROJECT_STORE" => Some("memory".to_string()),
            other => lookup(other),
        })
        .expect("memory config always loads");

        Self {
            config,
            store: InMemoryProjectStore::new(),
            media: MockMediaStore::new(),
        }
    }

    /// A fresh router sharing this app's stores
    pub fn router(&self) -> Router {
        portfolio_app::create_app(
            &self.config,
            Arc::new(self.store.clone()),
            Arc::new(self.media.clone()),
        )
    }
}

/// Hand-built `multipart/form-data` body
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content: &[u8]) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: image/png\r\n\r\n",
                name, filename
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(content);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// All seven project fields with valid values
    pub fn project_fields(self) -> Self {
        self.text("title", "A")
            .text("description", "B")
            .text("gitRepoLink", "g")
            .text("projectLink", "p")
            .text("stack", "MERN")
            .text("technologies", "React")
            .text("deployed", "Yes")
    }

    pub fn banner(self) -> Self {
        self.file("projectBanner", "banner.png", b"\x89PNG banner")
    }

    pub fn into_request(mut self, method: Method, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

/// Request without a body
pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Parse response body as JSON Value
pub async fn parse_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
