//! Search transport trait definition.
//!
//! The helper only ever needs "send this method to this path with this JSON
//! body". Connection management, TLS and timeouts belong to the implementation.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::TransportError;

/// HTTP methods used against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request relative to the backend base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    /// Path relative to the base URL, without a leading slash (e.g. `catalog/book/_count`).
    pub path: String,
    pub body: Option<Value>,
}

impl TransportRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status and decoded body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// JSON body; `Null` when the body was empty, a string when it was not JSON.
    pub body: Value,
}

impl TransportResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Build a response from a raw body text.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self { status, body }
    }

    /// Any status below 400 is treated as an acknowledgement.
    pub fn is_accepted(&self) -> bool {
        self.status < 400
    }
}

/// Abstract HTTP transport to the search backend.
///
/// Implementations must be `Send + Sync`; one transport may serve many
/// helpers at once since requests are independent.
///
/// A response with a 4xx/5xx status is still `Ok`: interpreting the status
/// is the caller's job. `Err` is reserved for requests that produced no
/// status at all.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Send one request and wait for its response.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
