//! Per-type document counts.

use index_helper_shared::SummaryReport;
use serde_json::Value;
use tracing::{info, instrument};

use super::IndexHelper;
use crate::errors::HelperError;

impl IndexHelper {
    /// Count the documents of every type in the index mapping.
    ///
    /// Uses `mapping` when it is a JSON object, otherwise fetches the
    /// current mapping from the backend. The mapping is keyed by index name,
    /// as returned by `GET {index}/_mappings`. Types are counted one after
    /// the other, in mapping order.
    #[instrument(skip(self, mapping), fields(tracking = %self.tracking))]
    pub async fn get_document_summary(&self, mapping: Option<&Value>) -> Result<SummaryReport, HelperError> {
        let fetched;
        let mapping = match mapping {
            Some(value) if value.is_object() => value,
            _ => {
                fetched = self.get_index_mappings().await?;
                &fetched
            }
        };

        let type_names = mapped_type_names(mapping, &self.connection.name);

        let mut report = SummaryReport::default();
        for type_name in &type_names {
            let result = self.count_documents(type_name, None).await?;
            report.record(type_name, result.count);
        }

        info!(
            tracking = %self.tracking,
            types = type_names.len(),
            total = report.total(),
            "Built document summary"
        );
        Ok(report)
    }
}

/// Type names under `mapping[index].mappings`, in document order.
fn mapped_type_names(mapping: &Value, index_name: &str) -> Vec<String> {
    mapping
        .get(index_name)
        .and_then(|index| index.get("mappings"))
        .and_then(Value::as_object)
        .map(|types| types.keys().cloned().collect())
        .unwrap_or_default()
}
