//! The index helper.
//!
//! `IndexHelper` binds a connection configuration, a structure definition
//! and a tracking token to one transport. Its operations are split by
//! concern:
//!
//! - [`index`]: index existence, drop, create, reset and read-only views
//! - [`mapping_type`]: the same lifecycle for one type of the index
//! - [`documents`]: count, search, existence, insert, update, delete
//! - [`summary`]: per-type document counts
//!
//! Composite operations await each step before issuing the next one; no
//! operation sends concurrent requests.

mod documents;
mod index;
mod mapping_type;
mod summary;

#[cfg(test)]
pub(crate) mod fake;

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::ConnectionConfig;
use crate::errors::HelperError;
use crate::interfaces::{SearchTransport, TransportRequest};
use crate::structure::StructureDefinition;
use crate::tracking::TrackingToken;
use crate::types::{ConnectionInfo, ServiceHelp, ServiceHelpData, ServiceHelpLabels, ServiceInfo};

/// Lifecycle and document helper bound to a single index.
///
/// # Example
///
/// ```ignore
/// let connection = ConnectionConfig::new("es.local", 9200, "catalog");
/// let transport = Arc::new(OpenSearchTransport::from_config(&connection, None)?);
/// let helper = IndexHelper::new(connection, structure, transport, None)?;
///
/// helper.reset_index().await?;
/// let summary = helper.get_document_summary(None).await?;
/// ```
pub struct IndexHelper {
    connection: ConnectionConfig,
    structure: StructureDefinition,
    tracking: TrackingToken,
    transport: Arc<dyn SearchTransport>,
}

impl IndexHelper {
    /// Create a helper for the index named in `connection`.
    ///
    /// # Arguments
    ///
    /// * `connection` - Backend location and index name
    /// * `structure` - Settings and type mappings used to (re)create the index
    /// * `transport` - HTTP transport, possibly shared with other helpers
    /// * `tracking` - Token for log correlation; generated from the current time when `None`
    ///
    /// # Returns
    ///
    /// * `Ok(IndexHelper)` - A new helper
    /// * `Err(HelperError::InvalidConfig)` - If the connection configuration is unusable
    pub fn new(
        connection: ConnectionConfig,
        structure: StructureDefinition,
        transport: Arc<dyn SearchTransport>,
        tracking: Option<TrackingToken>,
    ) -> Result<Self, HelperError> {
        connection.validate()?;
        let tracking = tracking.unwrap_or_else(TrackingToken::generate);

        info!(
            tracking = %tracking,
            url = %connection.index_url(),
            types = ?structure.type_names().collect::<Vec<_>>(),
            "Created index helper"
        );

        Ok(Self {
            connection,
            structure,
            tracking,
            transport,
        })
    }

    pub fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    pub fn structure(&self) -> &StructureDefinition {
        &self.structure
    }

    pub fn tracking_token(&self) -> &TrackingToken {
        &self.tracking
    }

    /// `{protocol}://{host}:{port}/`
    pub fn base_url(&self) -> String {
        self.connection.base_url()
    }

    /// `{base_url}{index}/`
    pub fn index_url(&self) -> String {
        self.connection.index_url()
    }

    /// Connection parameters and resolved index URL.
    pub fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            connection_info: ConnectionInfo {
                protocol: self.connection.protocol().to_string(),
                host: self.connection.host.clone(),
                port: self.connection.port,
                name: self.connection.name.clone(),
            },
            url: self.index_url(),
        }
    }

    /// Description record for diagnostics and status pages.
    pub fn service_help(&self) -> ServiceHelp {
        let info = self.service_info();
        ServiceHelp {
            kind: "record".to_string(),
            title: "Elasticsearch bridge".to_string(),
            label: ServiceHelpLabels {
                connection_info: "Connection options".to_string(),
                url: "URL".to_string(),
            },
            data: ServiceHelpData {
                connection_info: serde_json::to_string_pretty(&info.connection_info)
                    .unwrap_or_default(),
                url: info.url,
            },
        }
    }

    /// Path relative to the base URL of something inside the index.
    fn index_path(&self, suffix: &str) -> String {
        format!("{}{}", self.connection.index_path(), suffix)
    }

    /// Send an existence probe.
    ///
    /// Any status below 400 means the resource exists. A status of 400 or
    /// above, or a transport failure, is reported as `NotFound`.
    async fn probe(&self, request: TransportRequest, resource: &str) -> Result<(), HelperError> {
        match self.transport.send(request).await {
            Ok(response) if response.is_accepted() => {
                info!(tracking = %self.tracking, status = response.status, "{} exists", resource);
                Ok(())
            }
            Ok(response) => {
                info!(tracking = %self.tracking, status = response.status, "{} does not exist", resource);
                Err(HelperError::not_found(
                    resource,
                    Some(response.status),
                    self.tracking.as_str(),
                ))
            }
            Err(e) => {
                warn!(tracking = %self.tracking, error = %e, "Probe of {} failed", resource);
                Err(HelperError::not_found(resource, None, self.tracking.as_str()))
            }
        }
    }

    /// Send a request and return the response body.
    ///
    /// Transport failures and statuses of 400 or above become `BackendError`
    /// carrying `operation`, `target` and the tracking token.
    async fn execute(
        &self,
        operation: &str,
        target: &str,
        request: TransportRequest,
    ) -> Result<Value, HelperError> {
        let response = self.transport.send(request).await.map_err(|e| {
            error!(tracking = %self.tracking, operation, target, error = %e, "Request failed");
            HelperError::backend(operation, target, None, e.to_string(), self.tracking.as_str())
        })?;

        if !response.is_accepted() {
            let message = error_message(&response.body);
            error!(
                tracking = %self.tracking,
                operation,
                target,
                status = response.status,
                message = %message,
                "Backend rejected request"
            );
            return Err(HelperError::backend(
                operation,
                target,
                Some(response.status),
                message,
                self.tracking.as_str(),
            ));
        }

        debug!(tracking = %self.tracking, operation, target, status = response.status, "Request succeeded");
        Ok(response.body)
    }
}

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode `value` so it stays one path segment.
fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Extract a readable reason from an error response body.
fn error_message(body: &Value) -> String {
    if let Some(reason) = body.pointer("/error/reason").and_then(Value::as_str) {
        return reason.to_string();
    }
    match body {
        Value::Null => "empty response".to_string(),
        Value::String(text) => text.clone(),
        Value::Object(map) => match map.get("error") {
            Some(Value::String(text)) => text.clone(),
            _ => body.to_string(),
        },
        other => other.to_string(),
    }
}

/// Reject type names that would address something other than a type.
fn validate_type(type_name: &str) -> Result<(), HelperError> {
    if type_name.is_empty() {
        return Err(HelperError::validation("type name is required"));
    }
    if type_name.contains('/') {
        return Err(HelperError::validation(format!(
            "type name must not contain '/': {}",
            type_name
        )));
    }
    Ok(())
}
