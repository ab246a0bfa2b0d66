//! Connection configuration and URL resolution.

use serde::{Deserialize, Serialize};

use crate::errors::HelperError;

/// Scheme used when the configuration does not name one.
pub const DEFAULT_PROTOCOL: &str = "http";

/// Where the backend lives and which index a helper is bound to.
///
/// The base URL and the index URL are pure functions of this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// URL scheme. Defaults to [`DEFAULT_PROTOCOL`] when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    pub host: String,
    pub port: u16,
    /// Name of the index.
    pub name: String,
}

impl ConnectionConfig {
    /// Create a config for `name` on `host:port` using the default protocol.
    pub fn new(host: impl Into<String>, port: u16, name: impl Into<String>) -> Self {
        Self {
            protocol: None,
            host: host.into(),
            port,
            name: name.into(),
        }
    }

    /// Set the protocol.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// The protocol in effect.
    pub fn protocol(&self) -> &str {
        self.protocol.as_deref().unwrap_or(DEFAULT_PROTOCOL)
    }

    /// `{protocol}://{host}:{port}/`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}/", self.protocol(), self.host, self.port)
    }

    /// `{base_url}{name}/`
    pub fn index_url(&self) -> String {
        format!("{}{}/", self.base_url(), self.name)
    }

    /// Path of the index relative to the base URL, with trailing slash.
    pub fn index_path(&self) -> String {
        format!("{}/", self.name)
    }

    /// Reject configurations that cannot produce a usable index URL.
    pub fn validate(&self) -> Result<(), HelperError> {
        if self.protocol().is_empty() {
            return Err(HelperError::invalid_config("protocol must not be empty"));
        }
        if self.host.is_empty() {
            return Err(HelperError::invalid_config("host is required"));
        }
        if self.name.is_empty() {
            return Err(HelperError::invalid_config("index name is required"));
        }
        if self.name.contains('/') {
            return Err(HelperError::invalid_config(format!(
                "index name must not contain '/': {}",
                self.name
            )));
        }
        Ok(())
    }
}
