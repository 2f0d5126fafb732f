use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, SearchResult, VectorStore, VectorStoreError,
};

pub const DEFAULT_TOP_K: usize = 4;

pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl Retriever {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            top_k,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>, RetrievalError> {
        self.retrieve_k(query, self.top_k).await
    }

    #[tracing::instrument(skip(self, query))]
    pub async fn retrieve_k(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<SearchResult>, RetrievalError> {
        if self
            .vector_store
            .is_empty()
            .await
            .map_err(RetrievalError::Search)?
        {
            return Err(RetrievalError::EmptyIndex);
        }

        let query_embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(RetrievalError::Embedding)?;

        let results = self
            .vector_store
            .search(&query_embedding, k)
            .await
            .map_err(RetrievalError::Search)?;

        tracing::debug!(
            result_count = results.len(),
            top_score = ?results.first().map(|r| r.score),
            "Retrieved chunks"
        );

        Ok(results)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("the document index is empty; upload documents first")]
    EmptyIndex,
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("search: {0}")]
    Search(#[from] VectorStoreError),
}
