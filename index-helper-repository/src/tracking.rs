//! Tracking token for correlating the log lines of one helper instance.

use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier attached to every log event of a helper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingToken(String);

impl TrackingToken {
    /// Use a caller-supplied token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Generate a token from the current time, e.g. `2024-05-01T10:20:30.123Z`.
    pub fn generate() -> Self {
        Self(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
