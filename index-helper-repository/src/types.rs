//! Introspection records exposed to the host application.

use serde::{Deserialize, Serialize};

/// Connection parameters as reported for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// Summary of what a helper is connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub connection_info: ConnectionInfo,
    /// Resolved index URL.
    pub url: String,
}

/// Field labels of a [`ServiceHelp`] record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHelpLabels {
    pub connection_info: String,
    pub url: String,
}

/// Field values of a [`ServiceHelp`] record, rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHelpData {
    /// Pretty-printed JSON of the connection info.
    pub connection_info: String,
    pub url: String,
}

/// Human-readable description record for status pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHelp {
    /// Always `"record"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub label: ServiceHelpLabels,
    pub data: ServiceHelpData,
}
