//! OpenSearch implementation of the search transport.
//!
//! This module provides a concrete implementation of `SearchTransport`
//! using the OpenSearch Rust client. The client speaks plain HTTP and is
//! equally usable against Elasticsearch.

mod transport;

pub use transport::OpenSearchTransport;
