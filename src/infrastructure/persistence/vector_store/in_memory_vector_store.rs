use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{DistanceMetric, SearchResult, VectorStore, VectorStoreError};
use crate::domain::{Embedding, VectorRecord};

/// Exhaustive-scan vector index held in process memory.
///
/// The record set is an immutable snapshot behind an `Arc`; a rebuild
/// validates the new set completely and then swaps the pointer, so a search
/// sees either the old or the new snapshot and never a mix.
pub struct InMemoryVectorStore {
    metric: DistanceMetric,
    snapshot: RwLock<Arc<Snapshot>>,
}

#[derive(Default)]
struct Snapshot {
    dimensions: usize,
    records: Vec<VectorRecord>,
}

impl InMemoryVectorStore {
    pub fn new(metric: DistanceMetric) -> Self {
        Self {
            metric,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    async fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new(DistanceMetric::Cosine)
    }
}

fn validate(records: &[VectorRecord]) -> Result<usize, VectorStoreError> {
    let Some(first) = records.first() else {
        return Ok(0);
    };
    let expected = first.embedding.dimensions();
    if expected == 0 {
        return Err(VectorStoreError::InvalidVector(
            first.chunk.id.as_uuid().to_string(),
        ));
    }

    for record in records {
        let actual = record.embedding.dimensions();
        if actual != expected {
            return Err(VectorStoreError::DimensionMismatch { expected, actual });
        }
        if !record.embedding.is_finite() {
            return Err(VectorStoreError::InvalidVector(
                record.chunk.id.as_uuid().to_string(),
            ));
        }
    }
    Ok(expected)
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn rebuild(&self, records: Vec<VectorRecord>) -> Result<(), VectorStoreError> {
        let dimensions = validate(&records)?;
        let next = Arc::new(Snapshot {
            dimensions,
            records,
        });

        let mut guard = self.snapshot.write().await;
        *guard = next;
        tracing::info!(
            records = guard.records.len(),
            dimensions = guard.dimensions,
            "Vector index replaced"
        );
        Ok(())
    }

    async fn clear(&self) -> Result<(), VectorStoreError> {
        *self.snapshot.write().await = Arc::new(Snapshot::default());
        Ok(())
    }

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let snapshot = self.current().await;
        if snapshot.records.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        if embedding.dimensions() != snapshot.dimensions {
            return Err(VectorStoreError::DimensionMismatch {
                expected: snapshot.dimensions,
                actual: embedding.dimensions(),
            });
        }
        if !embedding.is_finite() {
            return Err(VectorStoreError::InvalidVector("query".to_string()));
        }

        let mut scored: Vec<(usize, f32)> = snapshot
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (i, self.metric.score(embedding, &r.embedding)))
            .collect();
        // Stable: equal scores stay in insertion order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(i, score)| SearchResult {
                chunk: snapshot.records[i].chunk.clone(),
                score,
            })
            .collect())
    }

    async fn len(&self) -> Result<usize, VectorStoreError> {
        Ok(self.current().await.records.len())
    }
}
