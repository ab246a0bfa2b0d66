//! Document representation.
//!
//! A document carries an identifier and an optional extension block next to
//! its ordinary fields. Both are control metadata: they select the target
//! document and drive script updates, and are never part of a request body.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Reserved key holding the document identifier.
pub const ID_KEY: &str = "_id";

/// Reserved key holding the extension block.
pub const EXTENSION_KEY: &str = "_extension";

/// Control data attached to a document under [`EXTENSION_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentExtension {
    /// Opaque partial-update payloads, applied in order after the field diff.
    #[serde(default)]
    pub scripts: Vec<Value>,
}

/// A document as supplied by callers.
///
/// Deserializes from the flat JSON form used on the wire by callers:
///
/// ```json
/// { "_id": "x", "name": "n", "_extension": { "scripts": [ ... ] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Backend identifier of the document. Numeric identifiers are kept in
    /// their decimal form.
    #[serde(rename = "_id", default, deserialize_with = "deserialize_id")]
    pub id: String,

    /// Ordinary data fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    /// Optional extension block.
    #[serde(rename = "_extension", default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<DocumentExtension>,
}

impl Document {
    /// Create an empty document with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
            extension: None,
        }
    }

    /// Set a data field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Append a script payload to the extension block.
    pub fn with_script(mut self, script: Value) -> Self {
        self.extension
            .get_or_insert_with(DocumentExtension::default)
            .scripts
            .push(script);
        self
    }

    /// The data fields with reserved keys removed.
    ///
    /// `fields` never holds the reserved keys after deserialization, but a
    /// caller may have inserted them by hand.
    pub fn data(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|(key, _)| key.as_str() != ID_KEY && key.as_str() != EXTENSION_KEY)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Script payloads in application order. Empty when there is no extension.
    pub fn scripts(&self) -> &[Value] {
        self.extension
            .as_ref()
            .map(|ext| ext.scripts.as_slice())
            .unwrap_or(&[])
    }

    /// Check if there are data fields to send as a partial update.
    pub fn has_updates(&self) -> bool {
        !self.data().is_empty()
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "document id must be a string or a number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_splits_control_keys() {
        let doc: Document = serde_json::from_value(json!({
            "_id": "x",
            "name": "n",
            "_extension": { "scripts": [{ "script": "ctx._source.n += 1" }] }
        }))
        .unwrap();

        assert_eq!(doc.id, "x");
        assert_eq!(Value::Object(doc.data()), json!({ "name": "n" }));
        assert_eq!(doc.scripts().len(), 1);
    }

    #[test]
    fn test_data_drops_reserved_keys_inserted_by_hand() {
        let doc = Document::new("x")
            .with_field("name", json!("n"))
            .with_field(ID_KEY, json!("other"))
            .with_field(EXTENSION_KEY, json!({}));

        assert_eq!(Value::Object(doc.data()), json!({ "name": "n" }));
    }

    #[test]
    fn test_has_updates() {
        let doc = Document::new("x");
        assert!(!doc.has_updates());
        assert!(doc.scripts().is_empty());

        let doc = doc.with_script(json!({ "script": "noop" }));
        assert!(!doc.has_updates());

        let doc = doc.with_field("name", json!("n"));
        assert!(doc.has_updates());
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let doc: Document = serde_json::from_value(json!({ "_id": 42, "name": "n" })).unwrap();
        assert_eq!(doc.id, "42");
        assert_eq!(Value::Object(doc.data()), json!({ "name": "n" }));

        let doc: Document = serde_json::from_value(json!({ "_id": null })).unwrap();
        assert!(doc.id.is_empty());

        assert!(serde_json::from_value::<Document>(json!({ "_id": ["x"] })).is_err());
    }

    #[test]
    fn test_missing_extension_scripts_default_to_empty() {
        let doc: Document = serde_json::from_value(json!({ "_id": "x", "_extension": {} })).unwrap();
        assert!(doc.scripts().is_empty());
    }
}
