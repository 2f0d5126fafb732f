use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{PromptTemplate, PromptTemplateSource, TemplateError};

/// Downloads a template whose plain-text body uses `{context}` and
/// `{question}` placeholders.
pub struct RemoteTemplateSource {
    client: Client,
    url: String,
}

impl RemoteTemplateSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self, TemplateError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TemplateError::FetchFailed(e.to_string()))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl PromptTemplateSource for RemoteTemplateSource {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<PromptTemplate, TemplateError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| TemplateError::FetchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TemplateError::FetchFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TemplateError::FetchFailed(e.to_string()))?;

        PromptTemplate::new(self.url.clone(), body)
    }
}
