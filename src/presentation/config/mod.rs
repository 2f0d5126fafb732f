mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ChunkingSettings, ChunkingStrategy, ConfigError, DocumentsSettings, EmbeddingsSettings,
    LlmSettings, LoggingSettings, OPENAI_API_KEY_VAR, PromptSettings, RetrievalSettings,
    ServerSettings, Settings,
};
