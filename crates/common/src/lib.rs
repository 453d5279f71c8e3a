//! Shared utilities, configuration, and error handling for the portfolio API
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration management following 12-factor principles
//! - The tagged error type rendered as the JSON error envelope
//! - Store-level error types shared by repository implementations

pub mod config;
pub mod db;
pub mod error;

pub use config::{Config, StoreBackend};
pub use db::RepositoryError;
pub use error::{Error, Result};
