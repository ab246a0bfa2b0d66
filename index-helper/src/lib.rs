//! # Index Helper
//!
//! Runtime wiring for the index helper: environment-driven settings,
//! transport and helper construction, and tracing setup used by the
//! `index-helper` provisioning binary.

pub mod config;
pub mod telemetry;

pub use config::{Dependencies, HelperSettings};

use thiserror::Error;

/// Errors that can occur while configuring or running the helper.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Helper error.
    #[error("Helper error: {0}")]
    HelperError(#[from] index_helper_repository::HelperError),

    /// JSON error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
