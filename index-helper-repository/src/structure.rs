//! Index structure definition.
//!
//! The structure combines the index settings with the mapping of every type.
//! It is used verbatim to create the whole index and per entry to create a
//! single type's mapping.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::HelperError;

/// Settings and per-type mappings of an index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct StructureDefinition {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    settings: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    mappings: Map<String, Value>,

    /// Other top-level keys (aliases and the like), sent as-is.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl StructureDefinition {
    /// Create a structure from settings and type mappings.
    pub fn new(settings: Map<String, Value>, mappings: Map<String, Value>) -> Result<Self, HelperError> {
        Self::check_mappings(&mappings)?;
        Ok(Self {
            settings,
            mappings,
            extra: Map::new(),
        })
    }

    /// Build a structure from its JSON form.
    ///
    /// The root must be an object; `settings`, when present, an object;
    /// `mappings`, when present, an object of objects.
    pub fn from_value(value: Value) -> Result<Self, HelperError> {
        let Value::Object(mut root) = value else {
            return Err(HelperError::invalid_structure("structure must be a JSON object"));
        };

        let settings = match root.remove("settings") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(settings)) => settings,
            Some(_) => return Err(HelperError::invalid_structure("settings must be an object")),
        };

        let mappings = match root.remove("mappings") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(mappings)) => mappings,
            Some(_) => return Err(HelperError::invalid_structure("mappings must be an object")),
        };
        Self::check_mappings(&mappings)?;

        Ok(Self {
            settings,
            mappings,
            extra: root,
        })
    }

    fn check_mappings(mappings: &Map<String, Value>) -> Result<(), HelperError> {
        for (type_name, mapping) in mappings {
            if !mapping.is_object() {
                return Err(HelperError::invalid_structure(format!(
                    "mapping of type '{}' must be an object",
                    type_name
                )));
            }
        }
        Ok(())
    }

    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    pub fn mappings(&self) -> &Map<String, Value> {
        &self.mappings
    }

    /// The mapping of one type, if the structure defines it.
    pub fn mapping(&self, type_name: &str) -> Option<&Value> {
        self.mappings.get(type_name)
    }

    /// Type names in definition order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.mappings.keys().map(String::as_str)
    }

    /// Body of the create-index request.
    pub fn to_body(&self) -> Value {
        let mut body = self.extra.clone();
        if !self.settings.is_empty() {
            body.insert("settings".to_string(), Value::Object(self.settings.clone()));
        }
        if !self.mappings.is_empty() {
            body.insert("mappings".to_string(), Value::Object(self.mappings.clone()));
        }
        Value::Object(body)
    }

    /// Body of the put-mapping request for one type: `{ type: mapping }`.
    ///
    /// A type absent from the structure yields `{ type: null }`, which the
    /// backend rejects.
    pub fn type_mapping_body(&self, type_name: &str) -> Value {
        let mut body = Map::new();
        body.insert(
            type_name.to_string(),
            self.mapping(type_name).cloned().unwrap_or(Value::Null),
        );
        Value::Object(body)
    }
}

impl TryFrom<Value> for StructureDefinition {
    type Error = HelperError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
