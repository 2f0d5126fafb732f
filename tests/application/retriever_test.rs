use std::sync::Arc;
use std::sync::atomic::Ordering;

use pdfrag::application::ports::{Embedder, SearchResult, TextSplitter, VectorStore};
use pdfrag::domain::ChunkId;
use pdfrag::application::services::{Indexer, RetrievalError, Retriever};
use pdfrag::infrastructure::persistence::InMemoryVectorStore;
use pdfrag::infrastructure::text_processing::SlidingWindowSplitter;

use crate::helpers::{KeywordEmbedder, page};

#[tokio::test]
async fn given_empty_index_when_retrieving_then_fails_before_embedding() {
    let embedder = Arc::new(KeywordEmbedder::new());
    let retriever = Retriever::new(
        Arc::clone(&embedder) as Arc<dyn Embedder>,
        Arc::new(InMemoryVectorStore::default()),
        4,
    );

    let result = retriever.retrieve("anything").await;

    assert!(matches!(result, Err(RetrievalError::EmptyIndex)));
    assert_eq!(embedder.embed_calls.load(Ordering::SeqCst), 0);
}

async fn indexed_retriever(top_k: usize) -> Retriever {
    let embedder: Arc<dyn Embedder> = Arc::new(KeywordEmbedder::new());
    let store: Arc<dyn VectorStore> = Arc::new(InMemoryVectorStore::default());
    let splitter = SlidingWindowSplitter::new(1000, 200).unwrap();
    let pages = vec![
        page("a.pdf", 0, "whales swim in the ocean"),
        page("a.pdf", 1, "the rust compiler enforces borrow rules"),
        page("a.pdf", 2, "tobacco is a plant"),
        page("a.pdf", 3, "ocean tides"),
        page("a.pdf", 4, "rust borrow borrow"),
    ];
    Indexer::new(Arc::clone(&embedder), Arc::clone(&store), 8)
        .rebuild(splitter.split_pages(&pages).await.unwrap())
        .await
        .unwrap();
    Retriever::new(embedder, store, top_k)
}

#[tokio::test]
async fn given_indexed_chunks_when_retrieving_then_returns_top_k_most_relevant() {
    let retriever = indexed_retriever(2).await;

    let results = retriever.retrieve("how does the rust borrow checker work").await.unwrap();

    assert_eq!(retriever.top_k(), 2);
    let pages: Vec<u32> = results.iter().map(|r| r.chunk.source.page).collect();
    assert_eq!(pages.len(), 2);
    assert!(pages.contains(&1) && pages.contains(&4));
    assert!(results[0].score >= results[1].score);
}

#[tokio::test]
async fn given_unchanged_index_when_retrieving_twice_then_returns_same_ordered_results() {
    let retriever = indexed_retriever(4).await;
    let query = "ocean whales and rust";

    let first = retriever.retrieve(query).await.unwrap();
    let second = retriever.retrieve(query).await.unwrap();

    let ranked = |results: &[SearchResult]| -> Vec<(ChunkId, f32)> {
        results.iter().map(|r| (r.chunk.id, r.score)).collect()
    };
    assert_eq!(first.len(), 4);
    assert_eq!(ranked(&first), ranked(&second));
    assert!(first.windows(2).all(|pair| pair[0].score >= pair[1].score));
}
