//! Dependency initialization and wiring for the index helper.

use std::sync::Arc;

use tracing::info;

use crate::config::HelperSettings;
use crate::AppError;
use index_helper_repository::{IndexHelper, OpenSearchTransport, SearchTransport};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured helper bound to the index.
    pub helper: IndexHelper,
}

impl Dependencies {
    /// Initialize all dependencies from the given settings.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If the structure cannot be loaded or the transport cannot be built
    pub fn new(settings: HelperSettings) -> Result<Self, AppError> {
        let transport = OpenSearchTransport::from_config(&settings.connection, settings.request_timeout)
            .map_err(|e| AppError::config(format!("Failed to create transport: {}", e)))?;

        Self::with_transport(settings, Arc::new(transport))
    }

    /// Initialize dependencies on top of an existing transport.
    pub fn with_transport(
        settings: HelperSettings,
        transport: Arc<dyn SearchTransport>,
    ) -> Result<Self, AppError> {
        let structure = settings.load_structure()?;

        info!(
            url = %settings.connection.index_url(),
            types = structure.mappings().len(),
            "Initializing dependencies"
        );

        let helper = IndexHelper::new(settings.connection, structure, transport, settings.tracking)?;

        Ok(Self { helper })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use index_helper_repository::ConnectionConfig;

    #[test]
    fn test_new_builds_helper() {
        let settings = HelperSettings {
            connection: ConnectionConfig::new("es.local", 9200, "catalog"),
            structure_path: None,
            tracking: None,
            request_timeout: None,
        };

        let dependencies = Dependencies::new(settings).unwrap();
        assert_eq!(dependencies.helper.index_url(), "http://es.local:9200/catalog/");
    }

    #[test]
    fn test_missing_structure_file_fails() {
        let settings = HelperSettings {
            connection: ConnectionConfig::new("es.local", 9200, "catalog"),
            structure_path: Some("/nonexistent/structure.json".into()),
            tracking: None,
            request_timeout: None,
        };

        assert!(matches!(Dependencies::new(settings), Err(AppError::IoError(_))));
    }
}
