//! Interface definitions for the HTTP transport.
//!
//! This module defines the abstract `SearchTransport` trait that allows
//! for dependency injection and swappable transport implementations.

mod search_transport;

pub use search_transport::{Method, SearchTransport, TransportRequest, TransportResponse};
