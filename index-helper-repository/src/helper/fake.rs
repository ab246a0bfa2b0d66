//! In-memory backend used by the helper tests.
//!
//! Understands exactly the REST calls the helper issues and records every
//! request it receives, so tests can assert on order and bodies.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;

use crate::config::ConnectionConfig;
use crate::errors::TransportError;
use crate::helper::IndexHelper;
use crate::interfaces::{Method, SearchTransport, TransportRequest, TransportResponse};
use crate::structure::StructureDefinition;
use crate::tracking::TrackingToken;

#[derive(Default)]
struct FakeState {
    index: Option<String>,
    types: Vec<String>,
    documents: HashMap<(String, String), Map<String, Value>>,
    counts: HashMap<String, u64>,
    failures: HashMap<(Method, String), u16>,
    unreachable: bool,
}

/// Fake backend holding at most one index.
pub(crate) struct FakeBackend {
    state: Mutex<FakeState>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(FakeState::default()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Start with `index` present and holding `types`.
    pub(crate) fn with_index(index: &str, types: &[&str]) -> Self {
        let backend = Self::new();
        {
            let mut state = backend.state.try_lock().expect("fresh mutex");
            state.index = Some(index.to_string());
            state.types = types.iter().map(|t| t.to_string()).collect();
        }
        backend
    }

    /// Answer `method path` with `status` instead of handling it.
    pub(crate) async fn fail(&self, method: Method, path: &str, status: u16) {
        self.state
            .lock()
            .await
            .failures
            .insert((method, path.to_string()), status);
    }

    /// Make every request fail at the transport level.
    pub(crate) async fn go_offline(&self) {
        self.state.lock().await.unreachable = true;
    }

    /// Override the count reported for a type.
    pub(crate) async fn set_count(&self, type_name: &str, count: u64) {
        self.state.lock().await.counts.insert(type_name.to_string(), count);
    }

    pub(crate) async fn put_document(&self, type_name: &str, id: &str, source: Value) {
        let source = source.as_object().cloned().unwrap_or_default();
        self.state
            .lock()
            .await
            .documents
            .insert((type_name.to_string(), id.to_string()), source);
    }

    pub(crate) async fn document(&self, type_name: &str, id: &str) -> Option<Value> {
        self.state
            .lock()
            .await
            .documents
            .get(&(type_name.to_string(), id.to_string()))
            .cloned()
            .map(Value::Object)
    }

    pub(crate) async fn index_exists(&self) -> bool {
        self.state.lock().await.index.is_some()
    }

    pub(crate) async fn types(&self) -> Vec<String> {
        self.state.lock().await.types.clone()
    }

    pub(crate) async fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().await.clone()
    }

    /// Requests as `"METHOD path"` strings.
    pub(crate) async fn request_lines(&self) -> Vec<String> {
        self.requests()
            .await
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub(crate) async fn clear_requests(&self) {
        self.requests.lock().await.clear();
    }

    fn missing(what: &str) -> TransportResponse {
        TransportResponse::new(404, json!({ "error": { "reason": format!("{} not found", what) } }))
    }

    fn handle(state: &mut FakeState, request: &TransportRequest) -> TransportResponse {
        let ok = |body: Value| TransportResponse::new(200, body);

        if request.path == "_cluster/stats" {
            return ok(json!({ "status": "green", "indices": { "count": usize::from(state.index.is_some()) } }));
        }

        let decoded: Vec<String> = request
            .path
            .trim_end_matches('/')
            .split('/')
            .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
            .collect();
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();
        let index_name = segments[0];
        if state.index.as_deref() != Some(index_name) {
            // Only index creation is meaningful without an index.
            if segments.len() == 1 && request.method == Method::Post && state.index.is_none() {
                let body = request.body.clone().unwrap_or(Value::Null);
                state.index = Some(index_name.to_string());
                state.types = body
                    .get("mappings")
                    .and_then(Value::as_object)
                    .map(|m| m.keys().cloned().collect())
                    .unwrap_or_default();
                return ok(json!({ "acknowledged": true, "index": index_name }));
            }
            return Self::missing(&format!("index {}", index_name));
        }

        match (request.method, &segments[1..]) {
            (Method::Head, []) => ok(Value::Null),
            (Method::Post, []) => TransportResponse::new(
                400,
                json!({ "error": { "type": "resource_already_exists_exception", "reason": "index already exists" } }),
            ),
            (Method::Delete, []) => {
                state.index = None;
                state.types.clear();
                state.documents.clear();
                ok(json!({ "acknowledged": true }))
            }
            (Method::Get, ["_settings"]) => ok(json!({ index_name: { "settings": { "index": {} } } })),
            (Method::Get, ["_mappings"]) => {
                let mut mappings = Map::new();
                for type_name in &state.types {
                    mappings.insert(type_name.clone(), json!({ "properties": {} }));
                }
                ok(json!({ index_name: { "mappings": mappings } }))
            }
            (Method::Head, [type_name]) => {
                if state.types.iter().any(|t| t == type_name) {
                    ok(Value::Null)
                } else {
                    Self::missing(type_name)
                }
            }
            (Method::Delete, [type_name]) => {
                if let Some(pos) = state.types.iter().position(|t| t == type_name) {
                    state.types.remove(pos);
                    state.documents.retain(|(t, _), _| t != type_name);
                    ok(json!({ "acknowledged": true }))
                } else {
                    Self::missing(type_name)
                }
            }
            (Method::Put, [type_name, "_mapping"]) => {
                let mapping = request
                    .body
                    .as_ref()
                    .and_then(|b| b.get(*type_name))
                    .cloned()
                    .unwrap_or(Value::Null);
                if !mapping.is_object() {
                    return TransportResponse::new(
                        400,
                        json!({ "error": { "type": "mapper_parsing_exception", "reason": "mapping must be an object" } }),
                    );
                }
                if !state.types.iter().any(|t| t == type_name) {
                    state.types.push(type_name.to_string());
                }
                ok(json!({ "acknowledged": true }))
            }
            (Method::Post, [type_name, "_count"]) => {
                let count = state.counts.get(*type_name).copied().unwrap_or_else(|| {
                    state.documents.keys().filter(|(t, _)| t == type_name).count() as u64
                });
                ok(json!({ "count": count, "_shards": { "total": 1, "successful": 1, "failed": 0 } }))
            }
            (Method::Post, [type_name, "_search"]) => {
                let hits: Vec<Value> = state
                    .documents
                    .iter()
                    .filter(|((t, _), _)| t == type_name)
                    .map(|((_, id), source)| json!({ "_id": id, "_source": source }))
                    .collect();
                ok(json!({ "hits": { "total": hits.len(), "hits": hits } }))
            }
            (Method::Head, [type_name, id]) => {
                if state.documents.contains_key(&(type_name.to_string(), id.to_string())) {
                    ok(Value::Null)
                } else {
                    Self::missing(id)
                }
            }
            (Method::Put, [type_name, id]) => {
                let source = request
                    .body
                    .as_ref()
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                let created = state
                    .documents
                    .insert((type_name.to_string(), id.to_string()), source)
                    .is_none();
                ok(json!({ "_id": id, "result": (if created { "created" } else { "updated" }) }))
            }
            (Method::Delete, [type_name, id]) => {
                match state.documents.remove(&(type_name.to_string(), id.to_string())) {
                    Some(_) => ok(json!({ "_id": id, "result": "deleted" })),
                    None => Self::missing(id),
                }
            }
            (Method::Post, [type_name, id, "_update"]) => {
                let key = (type_name.to_string(), id.to_string());
                let Some(source) = state.documents.get_mut(&key) else {
                    return Self::missing(id);
                };
                let body = request.body.clone().unwrap_or(Value::Null);
                if let Some(fields) = body.get("doc").and_then(Value::as_object) {
                    for (field, value) in fields {
                        source.insert(field.clone(), value.clone());
                    }
                } else {
                    let applied = source
                        .entry("applied_scripts".to_string())
                        .or_insert_with(|| json!([]));
                    if let Some(list) = applied.as_array_mut() {
                        list.push(body);
                    }
                }
                ok(json!({ "_id": id, "result": "updated" }))
            }
            _ => TransportResponse::new(400, json!({ "error": "unsupported request" })),
        }
    }
}

#[async_trait]
impl SearchTransport for FakeBackend {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().await.push(request.clone());

        let mut state = self.state.lock().await;
        if state.unreachable {
            return Err(TransportError::connection("connection refused"));
        }
        if let Some(status) = state.failures.get(&(request.method, request.path.clone())) {
            return Ok(TransportResponse::new(
                *status,
                json!({ "error": { "reason": "injected failure" } }),
            ));
        }
        Ok(Self::handle(&mut state, &request))
    }
}

/// Structure of the `catalog` test index.
pub(crate) fn catalog_structure() -> StructureDefinition {
    StructureDefinition::from_value(json!({
        "settings": { "number_of_shards": 1 },
        "mappings": {
            "book": { "properties": { "title": { "type": "text" } } },
            "author": { "properties": { "name": { "type": "keyword" } } }
        }
    }))
    .expect("valid structure")
}

/// Helper bound to `http://es.local:9200/catalog/` on `backend`.
pub(crate) fn catalog_helper(backend: Arc<FakeBackend>) -> IndexHelper {
    IndexHelper::new(
        ConnectionConfig::new("es.local", 9200, "catalog").with_protocol("http"),
        catalog_structure(),
        backend,
        Some(TrackingToken::new("test")),
    )
    .expect("valid helper")
}
