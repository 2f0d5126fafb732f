use async_trait::async_trait;

use super::{SearchResult, VectorStoreError};
use crate::domain::{Embedding, VectorRecord};

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Replaces every stored record with `records`. Searches running
    /// concurrently observe either the previous or the new record set.
    async fn rebuild(&self, records: Vec<VectorRecord>) -> Result<(), VectorStoreError>;

    async fn clear(&self) -> Result<(), VectorStoreError>;

    /// Returns up to `top_k` records ordered by descending score. Equal scores
    /// keep insertion order.
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;

    async fn len(&self) -> Result<usize, VectorStoreError>;

    async fn is_empty(&self) -> Result<bool, VectorStoreError> {
        Ok(self.len().await? == 0)
    }
}
