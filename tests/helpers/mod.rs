#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use pdfrag::application::ports::{
    ConversationLog, ConversationLogError, Embedder, EmbedderError, FileLoader, FileLoaderError,
    LlmClient, LlmClientError, TextSplitter, UploadStore, VectorStore,
};
use pdfrag::application::services::{
    AnswerComposer, Indexer, IngestionService, QaService, Retriever,
};
use pdfrag::domain::{ConversationTurn, DocumentId, Embedding, Page};
use pdfrag::infrastructure::persistence::{InMemoryConversationLog, InMemoryVectorStore};
use pdfrag::infrastructure::prompt::BundledTemplateSource;
use pdfrag::infrastructure::storage::LocalUploadStore;
use pdfrag::infrastructure::text_processing::SlidingWindowSplitter;
use pdfrag::presentation::AppState;

pub const TEST_CHUNK_SIZE: usize = 1000;
pub const TEST_CHUNK_OVERLAP: usize = 200;
pub const TEST_TOP_K: usize = 4;
pub const TEST_ANSWER: &str = "Tobacco leaves are used to make cigarettes.";

pub const VOCABULARY: [&str; 8] = [
    "tobacco", "cigarette", "plant", "rust", "borrow", "compiler", "ocean", "whale",
];

/// Bag-of-keywords embedding: one dimension per vocabulary word plus a small
/// constant so no vector is ever all zeros.
pub fn keyword_vector(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    let mut values: Vec<f32> = VOCABULARY
        .iter()
        .map(|word| lower.matches(word).count() as f32)
        .collect();
    values.push(0.01);
    values
}

#[derive(Default)]
pub struct KeywordEmbedder {
    pub embed_calls: AtomicUsize,
    pub batch_calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Embedding::new(keyword_vector(text)))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|t| Embedding::new(keyword_vector(t)))
            .collect())
    }
}

pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        Err(EmbedderError::ApiRequestFailed("provider unreachable".to_string()))
    }

    async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Err(EmbedderError::ApiRequestFailed("provider unreachable".to_string()))
    }
}

/// Keyword embedder whose batch calls park until released, holding a rebuild
/// in flight. Single-text calls are never gated.
#[derive(Default)]
pub struct GatedEmbedder {
    inner: KeywordEmbedder,
    pub entered: Notify,
    pub release: Notify,
}

#[async_trait]
impl Embedder for GatedEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.inner.embed(text).await
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.embed_batch(texts).await
    }
}

#[derive(Default)]
pub struct RecordingLlm {
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().await.last().cloned()
    }
}

#[async_trait]
impl LlmClient for RecordingLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().await.push(prompt.to_string());
        Ok(TEST_ANSWER.to_string())
    }
}

pub struct FailingLlm;

#[async_trait]
impl LlmClient for FailingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Err(LlmClientError::ServerError {
            status: 503,
            body: "overloaded".to_string(),
        })
    }
}

pub const PAGE_BREAK: char = '\u{c}';
pub const CORRUPT_MARKER: &str = "%CORRUPT";

/// Reads "PDFs" written by the tests as UTF-8 text, one page per form feed.
/// A file starting with [`CORRUPT_MARKER`] fails like a damaged PDF.
pub struct TextPagesLoader;

#[async_trait]
impl FileLoader for TextPagesLoader {
    async fn extract_pages(
        &self,
        path: &Path,
        document_id: &DocumentId,
    ) -> Result<Vec<Page>, FileLoaderError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;
        if raw.starts_with(CORRUPT_MARKER) {
            return Err(FileLoaderError::ExtractionFailed("xref table not found".to_string()));
        }

        let pages: Vec<Page> = raw
            .split(PAGE_BREAK)
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(i, text)| Page::new(document_id.clone(), i as u32, text.trim().to_string()))
            .collect();

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(document_id.to_string()));
        }
        Ok(pages)
    }
}

/// Rejects every write and read.
pub struct FailingConversationLog;

#[async_trait]
impl ConversationLog for FailingConversationLog {
    async fn append(&self, _turn: ConversationTurn) -> Result<(), ConversationLogError> {
        Err(ConversationLogError::AppendFailed("log is read-only".to_string()))
    }

    async fn history(&self) -> Result<Vec<ConversationTurn>, ConversationLogError> {
        Err(ConversationLogError::ReadFailed("log is unavailable".to_string()))
    }

    async fn len(&self) -> Result<usize, ConversationLogError> {
        Err(ConversationLogError::ReadFailed("log is unavailable".to_string()))
    }
}

pub fn page(document: &str, index: u32, text: &str) -> Page {
    Page::new(DocumentId::new(document), index, text.to_string())
}

pub struct TestPipeline {
    pub ingestion: Arc<IngestionService>,
    pub qa: Arc<QaService>,
    pub vector_store: Arc<dyn VectorStore>,
    pub conversation_log: Arc<dyn ConversationLog>,
}

impl TestPipeline {
    pub fn state(&self) -> AppState {
        AppState::new(
            Arc::clone(&self.ingestion),
            Arc::clone(&self.qa),
            Arc::clone(&self.vector_store),
        )
    }
}

pub fn build_pipeline(
    documents_dir: &Path,
    embedder: Arc<dyn Embedder>,
    llm: Arc<dyn LlmClient>,
) -> TestPipeline {
    build_pipeline_with_log(
        documents_dir,
        embedder,
        llm,
        Arc::new(InMemoryConversationLog::new()),
    )
}

pub fn build_pipeline_with_log(
    documents_dir: &Path,
    embedder: Arc<dyn Embedder>,
    llm: Arc<dyn LlmClient>,
    conversation_log: Arc<dyn ConversationLog>,
) -> TestPipeline {
    let vector_store: Arc<dyn VectorStore> = Arc::new(InMemoryVectorStore::default());
    let upload_store: Arc<dyn UploadStore> =
        Arc::new(LocalUploadStore::new(documents_dir.to_path_buf()).unwrap());
    let splitter: Arc<dyn TextSplitter> =
        Arc::new(SlidingWindowSplitter::new(TEST_CHUNK_SIZE, TEST_CHUNK_OVERLAP).unwrap());

    let ingestion = Arc::new(IngestionService::new(
        upload_store,
        Arc::new(TextPagesLoader),
        splitter,
        Indexer::new(Arc::clone(&embedder), Arc::clone(&vector_store), 16),
    ));

    let qa = Arc::new(QaService::new(
        Retriever::new(embedder, Arc::clone(&vector_store), TEST_TOP_K),
        AnswerComposer::new(llm, BundledTemplateSource::template().unwrap()),
        Arc::clone(&conversation_log),
    ));

    TestPipeline {
        ingestion,
        qa,
        vector_store,
        conversation_log,
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}
