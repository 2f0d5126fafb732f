use pdfrag::application::ports::{DistanceMetric, VectorStore, VectorStoreError};
use pdfrag::domain::{Chunk, ChunkSource, DocumentId, Embedding, VectorRecord};
use pdfrag::infrastructure::persistence::InMemoryVectorStore;

fn record(name: &str, start: usize, values: Vec<f32>) -> VectorRecord {
    let source = ChunkSource {
        document_id: DocumentId::new("doc.pdf"),
        page: 0,
        start,
        end: start + name.len(),
    };
    VectorRecord::new(
        Chunk::new(name.to_string(), source, 1000, 200),
        Embedding::new(values),
    )
}

fn texts(results: &[pdfrag::application::ports::SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.chunk.text.as_str()).collect()
}

#[tokio::test]
async fn given_records_when_searching_then_orders_by_descending_similarity() {
    let store = InMemoryVectorStore::new(DistanceMetric::Cosine);
    store
        .rebuild(vec![
            record("far", 0, vec![0.0, 1.0]),
            record("near", 10, vec![1.0, 0.1]),
            record("middle", 20, vec![1.0, 1.0]),
        ])
        .await
        .unwrap();

    let results = store.search(&Embedding::new(vec![1.0, 0.0]), 3).await.unwrap();

    assert_eq!(texts(&results), vec!["near", "middle", "far"]);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn given_equal_scores_when_searching_then_keeps_insertion_order() {
    let store = InMemoryVectorStore::new(DistanceMetric::DotProduct);
    store
        .rebuild(vec![
            record("first", 0, vec![1.0, 0.0]),
            record("second", 10, vec![1.0, 0.0]),
            record("third", 20, vec![1.0, 0.0]),
        ])
        .await
        .unwrap();

    let results = store.search(&Embedding::new(vec![2.0, 0.0]), 2).await.unwrap();

    assert_eq!(texts(&results), vec!["first", "second"]);
}

#[tokio::test]
async fn given_top_k_larger_than_index_when_searching_then_returns_all_records() {
    let store = InMemoryVectorStore::default();
    store
        .rebuild(vec![record("only", 0, vec![1.0, 2.0])])
        .await
        .unwrap();

    let results = store.search(&Embedding::new(vec![1.0, 2.0]), 10).await.unwrap();

    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn given_mixed_dimensions_when_rebuilding_then_rejects_and_keeps_previous_index() {
    let store = InMemoryVectorStore::default();
    store
        .rebuild(vec![record("kept", 0, vec![1.0, 0.0])])
        .await
        .unwrap();

    let result = store
        .rebuild(vec![
            record("a", 0, vec![1.0, 0.0, 0.0]),
            record("b", 10, vec![1.0, 0.0]),
        ])
        .await;

    assert!(matches!(
        result,
        Err(VectorStoreError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    ));
    let results = store.search(&Embedding::new(vec![1.0, 0.0]), 4).await.unwrap();
    assert_eq!(texts(&results), vec!["kept"]);
}

#[tokio::test]
async fn given_non_finite_vector_when_rebuilding_then_rejects() {
    let store = InMemoryVectorStore::default();
    let result = store
        .rebuild(vec![record("bad", 0, vec![f32::INFINITY, 0.0])])
        .await;
    assert!(matches!(result, Err(VectorStoreError::InvalidVector(_))));
    assert!(store.is_empty().await.unwrap());
}

#[tokio::test]
async fn given_query_with_wrong_dimension_when_searching_then_returns_mismatch() {
    let store = InMemoryVectorStore::default();
    store
        .rebuild(vec![record("a", 0, vec![1.0, 0.0])])
        .await
        .unwrap();

    let result = store.search(&Embedding::new(vec![1.0]), 4).await;

    assert!(matches!(result, Err(VectorStoreError::DimensionMismatch { .. })));
}

#[tokio::test]
async fn given_populated_store_when_rebuilding_then_previous_records_are_replaced() {
    let store = InMemoryVectorStore::default();
    store
        .rebuild(vec![record("old", 0, vec![1.0, 0.0])])
        .await
        .unwrap();
    store
        .rebuild(vec![
            record("new-a", 0, vec![0.0, 1.0]),
            record("new-b", 10, vec![1.0, 1.0]),
        ])
        .await
        .unwrap();

    assert_eq!(store.len().await.unwrap(), 2);
    let results = store.search(&Embedding::new(vec![1.0, 0.0]), 4).await.unwrap();
    assert!(!texts(&results).contains(&"old"));

    store.clear().await.unwrap();
    assert!(store.is_empty().await.unwrap());
}
