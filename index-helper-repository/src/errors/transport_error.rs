//! Transport error types.
//!
//! This module defines the errors a `SearchTransport` implementation reports
//! when a request could not complete at the HTTP level.

use thiserror::Error;

/// Errors raised by the HTTP transport before a status code is available.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The backend could not be reached.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request could not be built or sent.
    #[error("Request error: {0}")]
    RequestError(String),

    /// The response body could not be read.
    #[error("Body error: {0}")]
    BodyError(String),
}

impl TransportError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    /// Create a body error.
    pub fn body(msg: impl Into<String>) -> Self {
        Self::BodyError(msg.into())
    }
}
