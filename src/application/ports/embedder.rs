use async_trait::async_trait;

use crate::domain::Embedding;

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError>;
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedderError {
    #[error("embedding api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("embedding rate limited")]
    RateLimited,
    #[error("embedding request timed out")]
    Timeout,
    #[error("embedding server error: HTTP {status}: {body}")]
    ServerError { status: u16, body: String },
    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
}

impl EmbedderError {
    /// Errors worth retrying after a backoff.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EmbedderError::RateLimited | EmbedderError::Timeout | EmbedderError::ServerError { .. }
        )
    }
}
