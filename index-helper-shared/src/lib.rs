//! # Index Helper Shared
//!
//! Data types shared between the index helper repository and its callers:
//! documents with their control metadata, count/update results, and the
//! per-type summary report.

mod document;
mod query;
mod summary;

pub use document::{Document, DocumentExtension, EXTENSION_KEY, ID_KEY};
pub use query::{match_all_query, normalize_count_query, CountResult};
pub use summary::{SummaryReport, UpdateReport};
