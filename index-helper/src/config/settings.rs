//! Environment-driven settings.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use index_helper_repository::{ConnectionConfig, StructureDefinition, TrackingToken};

use crate::AppError;

/// Default backend host.
const DEFAULT_HOST: &str = "localhost";

/// Default backend port.
const DEFAULT_PORT: u16 = 9200;

/// Everything needed to build an `IndexHelper`.
#[derive(Debug, Clone)]
pub struct HelperSettings {
    pub connection: ConnectionConfig,
    /// JSON file holding the structure definition. An empty structure is used when unset.
    pub structure_path: Option<PathBuf>,
    pub tracking: Option<TrackingToken>,
    pub request_timeout: Option<Duration>,
}

impl HelperSettings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `ES_PROTOCOL`: URL scheme (default: http)
    /// - `ES_HOST`: backend host (default: localhost)
    /// - `ES_PORT`: backend port (default: 9200)
    /// - `ES_INDEX`: index name (required)
    /// - `ES_STRUCTURE_PATH`: path to a JSON structure definition
    /// - `ES_TRACKING_CODE`: tracking token (generated when unset)
    /// - `ES_REQUEST_TIMEOUT_SECS`: per-request timeout
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let name = get("ES_INDEX").ok_or_else(|| AppError::config("ES_INDEX is required"))?;
        let host = get("ES_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("ES_PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| AppError::config(format!("Invalid ES_PORT {}: {}", port, e)))?,
            None => DEFAULT_PORT,
        };

        let mut connection = ConnectionConfig::new(host, port, name);
        if let Some(protocol) = get("ES_PROTOCOL") {
            connection = connection.with_protocol(protocol);
        }

        let request_timeout = match get("ES_REQUEST_TIMEOUT_SECS") {
            Some(secs) => Some(Duration::from_secs(secs.parse::<u64>().map_err(|e| {
                AppError::config(format!("Invalid ES_REQUEST_TIMEOUT_SECS {}: {}", secs, e))
            })?)),
            None => None,
        };

        Ok(Self {
            connection,
            structure_path: get("ES_STRUCTURE_PATH").map(PathBuf::from),
            tracking: get("ES_TRACKING_CODE").map(TrackingToken::new),
            request_timeout,
        })
    }

    /// Load the structure definition from `structure_path`.
    pub fn load_structure(&self) -> Result<StructureDefinition, AppError> {
        let Some(path) = &self.structure_path else {
            return Ok(StructureDefinition::default());
        };
        let text = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        Ok(StructureDefinition::from_value(value)?)
    }
}
