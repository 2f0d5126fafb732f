use async_trait::async_trait;

use crate::application::ports::{PromptTemplate, PromptTemplateSource, TemplateError};

/// Tries `primary` and falls back to `fallback` if it fails for any reason.
pub struct FallbackTemplateSource {
    primary: Box<dyn PromptTemplateSource>,
    fallback: Box<dyn PromptTemplateSource>,
}

impl FallbackTemplateSource {
    pub fn new(
        primary: Box<dyn PromptTemplateSource>,
        fallback: Box<dyn PromptTemplateSource>,
    ) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl PromptTemplateSource for FallbackTemplateSource {
    async fn fetch(&self) -> Result<PromptTemplate, TemplateError> {
        match self.primary.fetch().await {
            Ok(template) => Ok(template),
            Err(e) => {
                tracing::warn!(error = %e, "Prompt template fetch failed, using fallback");
                self.fallback.fetch().await
            }
        }
    }
}
