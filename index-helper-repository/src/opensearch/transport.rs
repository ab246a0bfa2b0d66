//! OpenSearch transport implementation.
//!
//! Requests are sent through `OpenSearch::send`, so every path of the helper
//! is expressed as a raw REST call on top of the client's connection handling.

use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    http::{
        headers::HeaderMap,
        request::JsonBody,
        transport::{SingleNodeConnectionPool, TransportBuilder},
        Method as HttpMethod,
    },
    OpenSearch,
};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::ConnectionConfig;
use crate::errors::{HelperError, TransportError};
use crate::interfaces::{Method, SearchTransport, TransportRequest, TransportResponse};

/// HTTP transport backed by the OpenSearch client.
///
/// # Example
///
/// ```ignore
/// let config = ConnectionConfig::new("localhost", 9200, "catalog");
/// let transport = OpenSearchTransport::from_config(&config, None)?;
/// let helper = IndexHelper::new(config, structure, Arc::new(transport), None)?;
/// ```
pub struct OpenSearchTransport {
    client: OpenSearch,
    base_url: Url,
}

impl OpenSearchTransport {
    /// Create a transport for the given base URL (e.g. "http://localhost:9200/").
    ///
    /// # Arguments
    ///
    /// * `url` - Base URL of the backend
    /// * `timeout` - Optional per-request timeout applied by the client
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchTransport)` - A new transport
    /// * `Err(HelperError)` - If the URL is invalid or the client cannot be built
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, HelperError> {
        let base_url = Url::parse(url)
            .map_err(|e| HelperError::invalid_config(format!("Invalid backend URL {}: {}", url, e)))?;

        let conn_pool = SingleNodeConnectionPool::new(base_url.clone());
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let transport = builder
            .build()
            .map_err(|e| HelperError::invalid_config(e.to_string()))?;

        info!(url = %base_url, "Created OpenSearch transport");

        Ok(Self {
            client: OpenSearch::new(transport),
            base_url,
        })
    }

    /// Create a transport pointing at the base URL of `config`.
    pub fn from_config(config: &ConnectionConfig, timeout: Option<Duration>) -> Result<Self, HelperError> {
        Self::new(&config.base_url(), timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn http_method(method: Method) -> HttpMethod {
        match method {
            Method::Get => HttpMethod::Get,
            Method::Head => HttpMethod::Head,
            Method::Post => HttpMethod::Post,
            Method::Put => HttpMethod::Put,
            Method::Delete => HttpMethod::Delete,
        }
    }
}

#[async_trait]
impl SearchTransport for OpenSearchTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let path = format!("/{}", request.path.trim_start_matches('/'));

        let response = self
            .client
            .send(
                Self::http_method(request.method),
                &path,
                HeaderMap::new(),
                None::<&()>,
                request.body.map(JsonBody::<Value>::new),
                None,
            )
            .await
            .map_err(|e| TransportError::connection(e.to_string()))?;

        let status = response.status_code().as_u16();
        let text = if request.method == Method::Head {
            String::new()
        } else {
            response
                .text()
                .await
                .map_err(|e| TransportError::body(e.to_string()))?
        };

        debug!(method = %request.method, path = %path, status = status, "Request completed");
        Ok(TransportResponse::from_text(status, &text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = OpenSearchTransport::new("not a url", None);
        assert!(matches!(result, Err(HelperError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_config_uses_base_url() {
        let config = ConnectionConfig::new("es.local", 9200, "catalog");
        let transport = OpenSearchTransport::from_config(&config, Some(Duration::from_secs(5))).unwrap();
        assert_eq!(transport.base_url().as_str(), "http://es.local:9200/");
    }
}
