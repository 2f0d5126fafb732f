use async_trait::async_trait;

use crate::application::ports::{PromptTemplate, PromptTemplateSource, TemplateError};

pub const RAG_PROMPT_NAME: &str = "rlm/rag-prompt";

pub const RAG_PROMPT: &str = "You are an assistant for question-answering tasks. \
Use the following pieces of retrieved context to answer the question. \
If you don't know the answer, just say that you don't know. \
Use three sentences maximum and keep the answer concise.\n\
Question: {question} \n\
Context: {context} \n\
Answer:";

/// The question-answering prompt compiled into the binary.
#[derive(Default)]
pub struct BundledTemplateSource;

impl BundledTemplateSource {
    pub fn template() -> Result<PromptTemplate, TemplateError> {
        PromptTemplate::new(RAG_PROMPT_NAME, RAG_PROMPT)
    }
}

#[async_trait]
impl PromptTemplateSource for BundledTemplateSource {
    async fn fetch(&self) -> Result<PromptTemplate, TemplateError> {
        Self::template()
    }
}
