//! Query helpers and typed count results.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The query used when callers do not supply a well-formed one.
pub fn match_all_query() -> Value {
    json!({ "query": { "match_all": {} } })
}

/// Resolve the body of a count request.
///
/// Anything other than a JSON object falls back to [`match_all_query`].
pub fn normalize_count_query(query: Option<&Value>) -> Value {
    match query {
        Some(value) if value.is_object() => value.clone(),
        _ => match_all_query(),
    }
}

/// Response of a `_count` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountResult {
    /// Number of documents matching the query.
    pub count: u64,
    /// Shard statistics as reported by the backend.
    #[serde(rename = "_shards", default, skip_serializing_if = "Option::is_none")]
    pub shards: Option<Value>,
}
