use std::sync::Arc;

use crate::application::ports::{Embedder, EmbedderError, VectorStore, VectorStoreError};
use crate::domain::{Chunk, VectorRecord};

/// Embeds chunks and publishes them as a fresh index.
pub struct Indexer {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    batch_size: usize,
}

impl Indexer {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        batch_size: usize,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            batch_size: batch_size.max(1),
        }
    }

    /// Embeds every chunk, then replaces the store contents in one step.
    /// The first embedding failure aborts the build and the store keeps its
    /// previous records.
    #[tracing::instrument(skip(self, chunks), fields(chunk_count = chunks.len()))]
    pub async fn rebuild(&self, chunks: Vec<Chunk>) -> Result<usize, IndexError> {
        let mut records = Vec::with_capacity(chunks.len());

        for batch in chunks.chunks(self.batch_size) {
            let texts: Vec<&str> = batch.iter().map(|c| c.text.as_str()).collect();
            let embeddings = self
                .embedder
                .embed_batch(&texts)
                .await
                .map_err(IndexError::Embedding)?;

            if embeddings.len() != batch.len() {
                return Err(IndexError::Embedding(EmbedderError::InvalidResponse(
                    format!(
                        "expected {} embeddings, got {}",
                        batch.len(),
                        embeddings.len()
                    ),
                )));
            }

            for (chunk, embedding) in batch.iter().zip(embeddings) {
                if embedding.dimensions() == 0 {
                    return Err(IndexError::Embedding(EmbedderError::InvalidResponse(
                        format!("empty embedding for chunk {}", chunk.id.as_uuid()),
                    )));
                }
                records.push(VectorRecord::new(chunk.clone(), embedding));
            }

            tracing::debug!(embedded = records.len(), "Embedded batch");
        }

        let count = records.len();
        self.vector_store
            .rebuild(records)
            .await
            .map_err(IndexError::Storage)?;

        tracing::info!(record_count = count, "Index rebuilt");
        Ok(count)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("storage: {0}")]
    Storage(VectorStoreError),
}
