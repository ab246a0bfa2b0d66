//! Index helper error types.
//!
//! This module defines the errors surfaced by `IndexHelper` operations.
//! `NotFound` is the branch signal of existence probes; every other
//! operation reports failures as `BackendError`.

use thiserror::Error;

/// Errors that can occur during index, type and document operations.
#[derive(Debug, Clone, Error)]
pub enum HelperError {
    /// An existence probe did not find the resource.
    ///
    /// `status` is `None` when the probe failed at the transport level, so
    /// the resource may exist on a backend that could not be reached.
    #[error("<{tracking}> {resource} not found (status: {})", display_status(.status))]
    NotFound {
        resource: String,
        status: Option<u16>,
        tracking: String,
    },

    /// A non-probe operation failed in transport or was rejected by the backend.
    #[error("<{tracking}> {operation} on {target} failed (status: {}): {message}", display_status(.status))]
    BackendError {
        operation: String,
        target: String,
        status: Option<u16>,
        message: String,
        tracking: String,
    },

    /// The structure definition is malformed.
    #[error("Invalid structure definition: {0}")]
    InvalidStructure(String),

    /// The connection configuration is malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A request argument is invalid.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A successful response could not be interpreted.
    #[error("Parse error: {0}")]
    ParseError(String),
}

fn display_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "transport failure".to_string(),
    }
}

impl HelperError {
    /// Create a not found error.
    pub fn not_found(
        resource: impl Into<String>,
        status: Option<u16>,
        tracking: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            resource: resource.into(),
            status,
            tracking: tracking.into(),
        }
    }

    /// Create a backend error.
    pub fn backend(
        operation: impl Into<String>,
        target: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
        tracking: impl Into<String>,
    ) -> Self {
        Self::BackendError {
            operation: operation.into(),
            target: target.into(),
            status,
            message: message.into(),
            tracking: tracking.into(),
        }
    }

    /// Create an invalid structure error.
    pub fn invalid_structure(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Check if this is the "resource absent" branch of a probe.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status reported by the backend, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { status, .. } | Self::BackendError { status, .. } => *status,
            _ => None,
        }
    }
}
