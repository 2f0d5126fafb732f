use std::path::Path;

use async_trait::async_trait;

use crate::domain::{DocumentId, Page};

#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Extracts the pages of one file in natural page order.
    async fn extract_pages(
        &self,
        path: &Path,
        document_id: &DocumentId,
    ) -> Result<Vec<Page>, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported file: {0}")]
    UnsupportedFile(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
    #[error("extraction timed out after {0}s")]
    Timeout(u64),
}
