//! Index lifecycle: existence, drop, create, reset, and read-only views.

use serde_json::Value;
use tracing::{debug, info, instrument};

use super::IndexHelper;
use crate::errors::HelperError;
use crate::interfaces::{Method, TransportRequest};

impl IndexHelper {
    /// Fetch cluster statistics from `{base_url}_cluster/stats`.
    #[instrument(skip(self), fields(tracking = %self.tracking))]
    pub async fn get_cluster_stats(&self) -> Result<Value, HelperError> {
        self.execute(
            "get_cluster_stats",
            "_cluster/stats",
            TransportRequest::new(Method::Get, "_cluster/stats"),
        )
        .await
    }

    /// Check whether the index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the backend reports the index
    /// * `Err(HelperError::NotFound)` - On a status of 400 or above, or a transport failure
    #[instrument(skip(self), fields(tracking = %self.tracking))]
    pub async fn check_index_available(&self) -> Result<(), HelperError> {
        let resource = format!("index {}", self.connection.name);
        self.probe(TransportRequest::new(Method::Head, self.index_path("")), &resource)
            .await
    }

    /// Fetch the settings of the index.
    #[instrument(skip(self), fields(tracking = %self.tracking))]
    pub async fn get_index_settings(&self) -> Result<Value, HelperError> {
        let path = self.index_path("_settings");
        self.execute("get_index_settings", &path, TransportRequest::new(Method::Get, path.clone()))
            .await
    }

    /// Fetch the mappings of the index, keyed by index name.
    #[instrument(skip(self), fields(tracking = %self.tracking))]
    pub async fn get_index_mappings(&self) -> Result<Value, HelperError> {
        let path = self.index_path("_mappings");
        self.execute("get_index_mappings", &path, TransportRequest::new(Method::Get, path.clone()))
            .await
    }

    /// Delete the index.
    #[instrument(skip(self), fields(tracking = %self.tracking))]
    pub async fn drop_index(&self) -> Result<(), HelperError> {
        let path = self.index_path("");
        let result = self
            .execute("drop_index", &path, TransportRequest::new(Method::Delete, path.clone()))
            .await?;
        info!(tracking = %self.tracking, result = %result, "Dropped index");
        Ok(())
    }

    /// Create the index from the full structure definition.
    #[instrument(skip(self), fields(tracking = %self.tracking))]
    pub async fn init_index(&self) -> Result<(), HelperError> {
        let path = self.index_path("");
        let request = TransportRequest::new(Method::Post, path.clone()).with_body(self.structure.to_body());
        let result = self.execute("init_index", &path, request).await?;
        info!(tracking = %self.tracking, result = %result, "Created index");
        Ok(())
    }

    /// Drop the index if it exists, then create it.
    ///
    /// An absent index is not an error. A failed drop of an existing index
    /// and a failed creation are propagated. Creation is only attempted once
    /// the drop has been acknowledged.
    #[instrument(skip(self), fields(tracking = %self.tracking))]
    pub async fn reset_index(&self) -> Result<(), HelperError> {
        match self.check_index_available().await {
            Ok(()) => self.drop_index().await?,
            Err(e) if e.is_not_found() => {
                debug!(tracking = %self.tracking, reason = %e, "Nothing to drop");
            }
            Err(e) => return Err(e),
        }
        self.init_index().await
    }
}
