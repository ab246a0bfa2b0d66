//! # Index Helper Repository
//!
//! This crate manages the lifecycle of one search index and the documents
//! inside it. It includes the connection and structure configuration, the
//! transport interface, an OpenSearch-backed transport, and `IndexHelper`,
//! which drives index/type resets, document CRUD and count summaries.

pub mod config;
pub mod errors;
pub mod helper;
pub mod interfaces;
pub mod opensearch;
pub mod structure;
pub mod tracking;
pub mod types;

pub use config::ConnectionConfig;
pub use errors::{HelperError, TransportError};
pub use helper::IndexHelper;
pub use interfaces::{Method, SearchTransport, TransportRequest, TransportResponse};
pub use opensearch::OpenSearchTransport;
pub use structure::StructureDefinition;
pub use tracking::TrackingToken;
pub use types::{ServiceHelp, ServiceInfo};
