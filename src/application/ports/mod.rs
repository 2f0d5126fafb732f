mod conversation_log;
mod distance_metric;
mod embedder;
mod file_loader;
mod llm_client;
mod prompt_template;
mod search_result;
mod text_splitter;
mod upload_store;
mod vector_store;
mod vector_store_error;

pub use conversation_log::{ConversationLog, ConversationLogError};
pub use distance_metric::DistanceMetric;
pub use embedder::{Embedder, EmbedderError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use prompt_template::{
    CONTEXT_PLACEHOLDER, PromptTemplate, PromptTemplateSource, QUESTION_PLACEHOLDER,
    TemplateError,
};
pub use search_result::SearchResult;
pub use text_splitter::{TextSplitter, TextSplitterError};
pub use upload_store::{UploadStore, UploadStoreError, sanitize_file_name};
pub use vector_store::VectorStore;
pub use vector_store_error::VectorStoreError;
