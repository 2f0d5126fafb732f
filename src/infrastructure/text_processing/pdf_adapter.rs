use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{DocumentId, Page};

use super::text_sanitizer::sanitize_extracted_text;

const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

pub struct PdfAdapter {
    timeout: Duration,
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    fn read_pages(path: &Path, document_id: &DocumentId) -> Result<Vec<Page>, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);

        for page_index in 0..page_count {
            let raw = doc.extract_text(page_index).map_err(|e| {
                FileLoaderError::ExtractionFailed(format!(
                    "failed to extract page {}: {e}",
                    page_index + 1
                ))
            })?;

            let text = sanitize_extracted_text(&raw);
            if !text.is_empty() {
                pages.push(Page::new(document_id.clone(), page_index as u32, text));
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, path),
        fields(
            document_id = %document_id,
            path = %path.display(),
        )
    )]
    async fn extract_pages(
        &self,
        path: &Path,
        document_id: &DocumentId,
    ) -> Result<Vec<Page>, FileLoaderError> {
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(FileLoaderError::UnsupportedFile(path.display().to_string()));
        }

        let owned_path: PathBuf = path.to_path_buf();
        let owned_id = document_id.clone();

        let pages = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::read_pages(&owned_path, &owned_id)),
        )
        .await
        .map_err(|_| FileLoaderError::Timeout(self.timeout.as_secs()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(document_id.to_string()));
        }

        Ok(pages)
    }
}
