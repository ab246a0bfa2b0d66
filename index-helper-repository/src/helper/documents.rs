//! Document operations: count, search, existence, insert, update, delete.
//!
//! The identifier and the extension block of a [`Document`] select the
//! target and drive script updates; only the data fields are ever sent.

use index_helper_shared::{normalize_count_query, CountResult, Document, UpdateReport};
use serde_json::{json, Map, Value};
use tracing::{debug, info, instrument};

use super::{path_segment, validate_type, IndexHelper};
use crate::errors::HelperError;
use crate::interfaces::{Method, TransportRequest};

impl IndexHelper {
    /// Count the documents of `type_name` matching `query`.
    ///
    /// A missing query, or one that is not a JSON object, counts everything.
    #[instrument(skip(self, query), fields(tracking = %self.tracking))]
    pub async fn count_documents(
        &self,
        type_name: &str,
        query: Option<&Value>,
    ) -> Result<CountResult, HelperError> {
        validate_type(type_name)?;
        let body = normalize_count_query(query);
        debug!(tracking = %self.tracking, query = %body, "Counting {} documents", type_name);

        let path = self.index_path(&format!("{}/_count", path_segment(type_name)));
        let result = self
            .execute("count_documents", &path, TransportRequest::new(Method::Post, path.clone()).with_body(body))
            .await?;

        serde_json::from_value(result)
            .map_err(|e| HelperError::parse(format!("Invalid count response for {}: {}", type_name, e)))
    }

    /// Search the documents of `type_name` and return the raw result set.
    #[instrument(skip(self, query), fields(tracking = %self.tracking))]
    pub async fn find_documents(&self, type_name: &str, query: &Value) -> Result<Value, HelperError> {
        validate_type(type_name)?;
        debug!(tracking = %self.tracking, query = %query, "Finding {} documents", type_name);

        let path = self.index_path(&format!("{}/_search", path_segment(type_name)));
        self.execute(
            "find_documents",
            &path,
            TransportRequest::new(Method::Post, path.clone()).with_body(query.clone()),
        )
        .await
    }

    /// Check whether the document `id` of `type_name` exists.
    #[instrument(skip(self), fields(tracking = %self.tracking))]
    pub async fn check_document_available(&self, type_name: &str, id: &str) -> Result<(), HelperError> {
        let path = self.document_path(type_name, id)?;
        let resource = format!("document {} of type {}", id, type_name);
        self.probe(TransportRequest::new(Method::Head, path), &resource).await
    }

    /// Store `document` under its identifier, replacing any previous version.
    #[instrument(skip(self, document), fields(tracking = %self.tracking, id = %document.id))]
    pub async fn insert_document(&self, type_name: &str, document: &Document) -> Result<Value, HelperError> {
        let path = self.document_path(type_name, &document.id)?;
        let body = Value::Object(document.data());
        debug!(tracking = %self.tracking, body = %body, "Inserting {} document", type_name);

        let result = self
            .execute("insert_document", &path, TransportRequest::new(Method::Put, path.clone()).with_body(body))
            .await?;
        info!(tracking = %self.tracking, id = %document.id, "Inserted {} document", type_name);
        Ok(result)
    }

    /// Apply the data fields of `document` as a partial update, then each of
    /// its scripts in order.
    ///
    /// Every request is awaited before the next is sent. The first failure
    /// stops the sequence and is returned.
    #[instrument(skip(self, document), fields(tracking = %self.tracking, id = %document.id))]
    pub async fn update_document(
        &self,
        type_name: &str,
        document: &Document,
    ) -> Result<UpdateReport, HelperError> {
        validate_type(type_name)?;
        let fields = self.update_fields(type_name, document).await?;
        let scripts = self.update_scripts(type_name, document).await?;
        Ok(UpdateReport {
            document: fields,
            scripts,
        })
    }

    /// Send the data fields wrapped as `{"doc": ...}`. No request when there
    /// are none.
    async fn update_fields(&self, type_name: &str, document: &Document) -> Result<Option<Value>, HelperError> {
        if document.id.is_empty() || !document.has_updates() {
            debug!(tracking = %self.tracking, "No fields to update on {} document", type_name);
            return Ok(None);
        }

        let result = self
            .send_update(type_name, &document.id, json!({ "doc": document.data() }))
            .await?;
        Ok(Some(result))
    }

    /// Send each script payload in list order.
    async fn update_scripts(&self, type_name: &str, document: &Document) -> Result<Vec<Value>, HelperError> {
        let scripts = document.scripts();
        if document.id.is_empty() || scripts.is_empty() {
            return Ok(Vec::new());
        }

        let mut results = Vec::with_capacity(scripts.len());
        for (position, script) in scripts.iter().enumerate() {
            if is_empty_payload(script) {
                debug!(tracking = %self.tracking, position, "Skipping empty script");
                results.push(Value::Object(Map::new()));
                continue;
            }
            debug!(tracking = %self.tracking, position, script = %script, "Applying script");
            results.push(self.send_update(type_name, &document.id, script.clone()).await?);
        }
        Ok(results)
    }

    async fn send_update(&self, type_name: &str, id: &str, body: Value) -> Result<Value, HelperError> {
        let path = format!("{}/_update", self.document_path(type_name, id)?);
        let result = self
            .execute("update_document", &path, TransportRequest::new(Method::Post, path.clone()).with_body(body))
            .await?;
        info!(tracking = %self.tracking, id = %id, "Updated {} document", type_name);
        Ok(result)
    }

    /// Delete the document identified by `document.id`.
    #[instrument(skip(self, document), fields(tracking = %self.tracking, id = %document.id))]
    pub async fn delete_document(&self, type_name: &str, document: &Document) -> Result<Value, HelperError> {
        let path = self.document_path(type_name, &document.id)?;
        let result = self
            .execute("delete_document", &path, TransportRequest::new(Method::Delete, path.clone()))
            .await?;
        info!(tracking = %self.tracking, id = %document.id, "Deleted {} document", type_name);
        Ok(result)
    }

    fn document_path(&self, type_name: &str, id: &str) -> Result<String, HelperError> {
        validate_type(type_name)?;
        if id.is_empty() {
            return Err(HelperError::validation("document id is required"));
        }
        Ok(self.index_path(&format!("{}/{}", path_segment(type_name), path_segment(id))))
    }
}

/// Only non-empty strings, arrays and objects carry a script.
fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
    }
}
