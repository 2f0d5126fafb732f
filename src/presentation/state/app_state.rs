use std::sync::Arc;

use crate::application::ports::VectorStore;
use crate::application::services::{IngestionService, QaService};

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub ingestion_service: Arc<IngestionService>,
    pub qa_service: Arc<QaService>,
    pub vector_store: Arc<dyn VectorStore>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        ingestion_service: Arc<IngestionService>,
        qa_service: Arc<QaService>,
        vector_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            ingestion_service,
            qa_service,
            vector_store,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
