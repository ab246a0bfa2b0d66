//! Error types for the index helper repository.

mod helper_error;
mod transport_error;

pub use helper_error::HelperError;
pub use transport_error::TransportError;
