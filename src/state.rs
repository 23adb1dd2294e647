use std::sync::Arc;

use crate::config::AppConfig;
use crate::report::ActivityReportGenerator;
use crate::upload::{LocalUploadStore, UploadStore};

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn UploadStore + Send + Sync>,
    pub generator: Arc<ActivityReportGenerator>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(LocalUploadStore::new(config.upload_folder.clone()));
        Self::new_with_store(config, store)
    }

    pub fn new_with_store(config: AppConfig, store: Arc<dyn UploadStore + Send + Sync>) -> Self {
        let generator = Arc::new(ActivityReportGenerator::from_config(&config));
        Self {
            config,
            store,
            generator,
        }
    }
}
