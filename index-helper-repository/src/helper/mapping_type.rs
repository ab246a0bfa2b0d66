//! Type lifecycle: the index lifecycle at the granularity of one mapping type.

use tracing::{debug, info, instrument, warn};

use super::{path_segment, validate_type, IndexHelper};
use crate::errors::HelperError;
use crate::interfaces::{Method, TransportRequest};

impl IndexHelper {
    /// Check whether `type_name` exists in the index.
    #[instrument(skip(self), fields(tracking = %self.tracking))]
    pub async fn check_type_available(&self, type_name: &str) -> Result<(), HelperError> {
        validate_type(type_name)?;
        let resource = format!("type {}", type_name);
        let path = self.index_path(&path_segment(type_name));
        self.probe(TransportRequest::new(Method::Head, path), &resource).await
    }

    /// Delete `type_name` from the index.
    #[instrument(skip(self), fields(tracking = %self.tracking))]
    pub async fn drop_type(&self, type_name: &str) -> Result<(), HelperError> {
        validate_type(type_name)?;
        let path = self.index_path(&path_segment(type_name));
        let result = self
            .execute("drop_type", &path, TransportRequest::new(Method::Delete, path.clone()))
            .await?;
        info!(tracking = %self.tracking, result = %result, "Dropped type {}", type_name);
        Ok(())
    }

    /// Create or update the mapping of `type_name` from the structure definition.
    ///
    /// A type missing from the structure is sent as `null`; the backend
    /// rejects it and the rejection is returned as `BackendError`.
    #[instrument(skip(self), fields(tracking = %self.tracking))]
    pub async fn init_type(&self, type_name: &str) -> Result<(), HelperError> {
        validate_type(type_name)?;
        if self.structure.mapping(type_name).is_none() {
            warn!(tracking = %self.tracking, "Structure defines no mapping for type {}", type_name);
        }

        let path = self.index_path(&format!("{}/_mapping", path_segment(type_name)));
        let request = TransportRequest::new(Method::Put, path.clone())
            .with_body(self.structure.type_mapping_body(type_name));
        let result = self.execute("init_type", &path, request).await?;
        info!(tracking = %self.tracking, result = %result, "Mapped type {}", type_name);
        Ok(())
    }

    /// Drop `type_name` if it exists, then recreate its mapping.
    ///
    /// Same sequencing and failure policy as [`IndexHelper::reset_index`].
    #[instrument(skip(self), fields(tracking = %self.tracking))]
    pub async fn reset_type(&self, type_name: &str) -> Result<(), HelperError> {
        match self.check_type_available(type_name).await {
            Ok(()) => self.drop_type(type_name).await?,
            Err(e) if e.is_not_found() => {
                debug!(tracking = %self.tracking, reason = %e, "Nothing to drop");
            }
            Err(e) => return Err(e),
        }
        self.init_type(type_name).await
    }
}
