use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError, PromptTemplate, SearchResult};

use super::count_tokens;

const CONTEXT_SEPARATOR: &str = "\n\n";

/// Turns retrieved chunks and a question into a prompt and returns the
/// model's reply verbatim.
pub struct AnswerComposer {
    llm_client: Arc<dyn LlmClient>,
    template: PromptTemplate,
}

impl AnswerComposer {
    pub fn new(llm_client: Arc<dyn LlmClient>, template: PromptTemplate) -> Self {
        Self {
            llm_client,
            template,
        }
    }

    pub fn format_context(results: &[SearchResult]) -> String {
        results
            .iter()
            .map(|r| r.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR)
    }

    pub fn build_prompt(&self, question: &str, results: &[SearchResult]) -> String {
        let context = Self::format_context(results);
        self.template.render(&context, question)
    }

    #[tracing::instrument(skip(self, question, results), fields(template = %self.template.name(), chunk_count = results.len()))]
    pub async fn compose(
        &self,
        question: &str,
        results: &[SearchResult],
    ) -> Result<String, CompositionError> {
        let prompt = self.build_prompt(question, results);
        tracing::debug!(prompt_tokens = count_tokens(&prompt), "Prompt assembled");

        self.llm_client
            .complete(&prompt)
            .await
            .map_err(CompositionError::Generation)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompositionError {
    #[error("generation: {0}")]
    Generation(LlmClientError),
}
