use async_trait::async_trait;

use crate::domain::{Chunk, Page};

#[async_trait]
pub trait TextSplitter: Send + Sync {
    async fn split(&self, page: &Page) -> Result<Vec<Chunk>, TextSplitterError>;

    /// Splits pages in order, concatenating their chunks.
    async fn split_pages(&self, pages: &[Page]) -> Result<Vec<Chunk>, TextSplitterError> {
        let mut chunks = Vec::new();
        for page in pages {
            chunks.extend(self.split(page).await?);
        }
        Ok(chunks)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TextSplitterError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
