//! Result types for composite operations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-type document counts for one index.
///
/// `label` maps each type name to itself for display; `count` maps it to the
/// number of documents reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub label: BTreeMap<String, String>,
    pub count: BTreeMap<String, u64>,
}

impl SummaryReport {
    /// Record the count of one type.
    pub fn record(&mut self, type_name: &str, count: u64) {
        self.label.insert(type_name.to_string(), type_name.to_string());
        self.count.insert(type_name.to_string(), count);
    }

    pub fn is_empty(&self) -> bool {
        self.count.is_empty()
    }

    /// Sum of all per-type counts.
    pub fn total(&self) -> u64 {
        self.count.values().sum()
    }
}

/// Ordered outcome of a document update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateReport {
    /// Backend result of the field diff, `None` when there was nothing to send.
    pub document: Option<Value>,
    /// Backend results of each script update, in application order. Empty
    /// payloads are not sent and yield an empty object.
    pub scripts: Vec<Value>,
}
