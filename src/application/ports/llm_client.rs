use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("request timed out")]
    Timeout,
    #[error("server error: HTTP {status}: {body}")]
    ServerError { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmClientError {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmClientError::RateLimited
                | LlmClientError::Timeout
                | LlmClientError::ServerError { .. }
        )
    }
}
