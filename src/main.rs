use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use pdfrag::application::ports::{
    ConversationLog, Embedder, LlmClient, PromptTemplate, PromptTemplateSource, UploadStore,
    VectorStore,
};
use pdfrag::application::services::{
    AnswerComposer, Indexer, IngestionService, QaService, Retriever,
};
use pdfrag::infrastructure::llm::{ChatClientOptions, OpenAiChatClient, OpenAiEmbedder, RetryPolicy};
use pdfrag::infrastructure::observability::{TracingConfig, init_tracing};
use pdfrag::infrastructure::persistence::{InMemoryConversationLog, InMemoryVectorStore};
use pdfrag::infrastructure::prompt::{
    BundledTemplateSource, FallbackTemplateSource, RemoteTemplateSource,
};
use pdfrag::infrastructure::storage::LocalUploadStore;
use pdfrag::infrastructure::text_processing::{PdfAdapter, TextSplitterFactory};
use pdfrag::presentation::config::{ConfigError, PromptSettings};
use pdfrag::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::new(environment.as_str(), settings.logging.json));

    let embedder: Arc<dyn Embedder> = Arc::new(OpenAiEmbedder::new(
        &settings.embeddings.base_url,
        settings.embeddings_api_key().to_string(),
        settings.embeddings.model.clone(),
        settings.embeddings.timeout(),
        retry_policy(settings.embeddings.max_retries),
    )?);

    let llm_client: Arc<dyn LlmClient> = Arc::new(OpenAiChatClient::new(
        &settings.llm.base_url,
        settings.llm_api_key().to_string(),
        ChatClientOptions {
            model: settings.llm.model.clone(),
            temperature: settings.llm.temperature,
            max_tokens: settings.llm.max_tokens,
            timeout: settings.llm.timeout(),
            retry: retry_policy(settings.llm.max_retries),
        },
    )?);

    let vector_store: Arc<dyn VectorStore> =
        Arc::new(InMemoryVectorStore::new(settings.retrieval.metric));
    let conversation_log: Arc<dyn ConversationLog> = Arc::new(InMemoryConversationLog::new());
    let upload_store: Arc<dyn UploadStore> =
        Arc::new(LocalUploadStore::new(settings.documents.dir.clone())?);

    let text_splitter = TextSplitterFactory::create(
        settings.chunking.strategy,
        settings.chunking.chunk_size,
        settings.chunking.chunk_overlap,
    )?;

    let template = load_template(&settings.prompt).await?;
    tracing::info!(template = %template.name(), "Prompt template loaded");

    let ingestion_service = Arc::new(IngestionService::new(
        upload_store,
        Arc::new(PdfAdapter::new()),
        text_splitter,
        Indexer::new(
            Arc::clone(&embedder),
            Arc::clone(&vector_store),
            settings.embeddings.batch_size,
        ),
    ));

    let qa_service = Arc::new(QaService::new(
        Retriever::new(
            Arc::clone(&embedder),
            Arc::clone(&vector_store),
            settings.retrieval.top_k,
        ),
        AnswerComposer::new(llm_client, template),
        conversation_log,
    ));

    if settings.documents.index_on_startup {
        match ingestion_service.rebuild_index().await {
            Ok(summary) => tracing::info!(
                documents = summary.document_count,
                chunks = summary.chunk_count,
                "Startup index built"
            ),
            Err(e) => tracing::warn!(error = %e, "Startup indexing failed, starting with an empty index"),
        }
    }

    let state = AppState::new(ingestion_service, qa_service, vector_store)
        .with_max_upload_bytes(settings.server.max_upload_mb * 1024 * 1024);
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, documents_dir = %settings.documents.dir.display(), "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn retry_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        ..RetryPolicy::default()
    }
}

async fn load_template(settings: &PromptSettings) -> Result<PromptTemplate, ConfigError> {
    let source: Box<dyn PromptTemplateSource> = match &settings.url {
        Some(url) => {
            let remote = RemoteTemplateSource::new(url.clone(), settings.timeout())
                .map_err(|e| ConfigError::Template(e.to_string()))?;
            Box::new(FallbackTemplateSource::new(
                Box::new(remote),
                Box::new(BundledTemplateSource),
            ))
        }
        None => Box::new(BundledTemplateSource),
    };
    source
        .fetch()
        .await
        .map_err(|e| ConfigError::Template(e.to_string()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
