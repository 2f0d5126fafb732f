use std::sync::Arc;
use std::sync::atomic::Ordering;

use pdfrag::application::ports::{Embedder, TextSplitter, VectorStore};
use pdfrag::application::services::{IndexError, Indexer};
use pdfrag::infrastructure::persistence::InMemoryVectorStore;
use pdfrag::infrastructure::text_processing::SlidingWindowSplitter;

use crate::helpers::{FailingEmbedder, KeywordEmbedder, page};

async fn chunks(count: usize) -> Vec<pdfrag::domain::Chunk> {
    let splitter = SlidingWindowSplitter::new(10, 0).unwrap();
    splitter
        .split(&page("a.pdf", 0, &"x".repeat(count * 10)))
        .await
        .unwrap()
}

#[tokio::test]
async fn given_chunks_when_rebuilding_then_embeds_in_batches_and_stores_all() {
    let embedder = Arc::new(KeywordEmbedder::new());
    let store = Arc::new(InMemoryVectorStore::default());
    let indexer = Indexer::new(
        Arc::clone(&embedder) as Arc<dyn Embedder>,
        Arc::clone(&store) as Arc<dyn VectorStore>,
        4,
    );

    let count = indexer.rebuild(chunks(10).await).await.unwrap();

    assert_eq!(count, 10);
    assert_eq!(store.len().await.unwrap(), 10);
    assert_eq!(embedder.batch_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn given_failing_embedder_when_rebuilding_then_previous_index_is_kept() {
    let store = Arc::new(InMemoryVectorStore::default());
    Indexer::new(Arc::new(KeywordEmbedder::new()), Arc::clone(&store) as Arc<dyn VectorStore>, 8)
        .rebuild(chunks(2).await)
        .await
        .unwrap();

    let result = Indexer::new(Arc::new(FailingEmbedder), Arc::clone(&store) as Arc<dyn VectorStore>, 8)
        .rebuild(chunks(5).await)
        .await;

    assert!(matches!(result, Err(IndexError::Embedding(_))));
    assert_eq!(store.len().await.unwrap(), 2);
}

#[tokio::test]
async fn given_no_chunks_when_rebuilding_then_index_becomes_empty() {
    let store = Arc::new(InMemoryVectorStore::default());
    let indexer = Indexer::new(
        Arc::new(KeywordEmbedder::new()),
        Arc::clone(&store) as Arc<dyn VectorStore>,
        8,
    );
    indexer.rebuild(chunks(3).await).await.unwrap();

    let count = indexer.rebuild(Vec::new()).await.unwrap();

    assert_eq!(count, 0);
    assert!(store.is_empty().await.unwrap());
}
