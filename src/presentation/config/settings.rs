use std::path::PathBuf;
use std::time::Duration;

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, File};
use serde::Deserialize;

use crate::application::ports::DistanceMetric;

use super::Environment;

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub documents: DocumentsSettings,
    pub chunking: ChunkingSettings,
    pub embeddings: EmbeddingsSettings,
    pub retrieval: RetrievalSettings,
    pub llm: LlmSettings,
    pub prompt: PromptSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsSettings {
    pub dir: PathBuf,
    pub index_on_startup: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkingStrategy {
    Fixed,
    Recursive,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub strategy: ChunkingStrategy,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsSettings {
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub batch_size: usize,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    pub top_k: usize,
    pub metric: DistanceMetric,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub temperature: f32,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptSettings {
    /// Remote template to fetch at startup; the bundled template is used when
    /// unset or unreachable.
    #[serde(default)]
    pub url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json: bool,
}

impl EmbeddingsSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PromptSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Built-in defaults, the layer every other source overrides.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.max_upload_mb", 50)?
            .set_default("documents.dir", "documents")?
            .set_default("documents.index_on_startup", true)?
            .set_default("chunking.strategy", "fixed")?
            .set_default("chunking.chunk_size", 1000)?
            .set_default("chunking.chunk_overlap", 200)?
            .set_default("embeddings.base_url", "https://api.openai.com/v1")?
            .set_default("embeddings.model", "text-embedding-3-small")?
            .set_default("embeddings.batch_size", 64)?
            .set_default("embeddings.timeout_secs", 30)?
            .set_default("embeddings.max_retries", 3)?
            .set_default("retrieval.top_k", 4)?
            .set_default("retrieval.metric", "cosine")?
            .set_default("llm.base_url", "https://api.openai.com/v1")?
            .set_default("llm.model", "gpt-3.5-turbo-0125")?
            .set_default("llm.temperature", 0.0)?
            .set_default("llm.timeout_secs", 60)?
            .set_default("llm.max_retries", 3)?
            .set_default("prompt.timeout_secs", 10)?
            .set_default("logging.json", false)?;
        Ok(builder)
    }

    /// Defaults, then `appsettings.toml`, then `appsettings.{env}.toml`, then
    /// `APP_*` environment variables (`__` separates sections).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let config = Self::defaults()?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                ::config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let fallback_key = std::env::var(OPENAI_API_KEY_VAR).ok();
        Self::from_config(config, fallback_key)
    }

    pub fn from_config(config: Config, fallback_api_key: Option<String>) -> Result<Self, ConfigError> {
        let mut settings: Settings = config.try_deserialize()?;
        settings.apply_api_key_fallback(fallback_api_key);
        settings.validate()?;
        Ok(settings)
    }

    fn apply_api_key_fallback(&mut self, fallback: Option<String>) {
        let fallback = fallback.filter(|k| !k.trim().is_empty());
        for key in [&mut self.embeddings.api_key, &mut self.llm.api_key] {
            if key.as_deref().is_none_or(|k| k.trim().is_empty()) {
                key.clone_from(&fallback);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunking.chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "chunking.chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(ConfigError::Invalid(format!(
                "chunking.chunk_overlap ({}) must be smaller than chunking.chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(ConfigError::Invalid(
                "retrieval.top_k must be greater than zero".to_string(),
            ));
        }
        if self.embeddings.batch_size == 0 {
            return Err(ConfigError::Invalid(
                "embeddings.batch_size must be greater than zero".to_string(),
            ));
        }
        for (key, secs) in [
            ("embeddings.timeout_secs", self.embeddings.timeout_secs),
            ("llm.timeout_secs", self.llm.timeout_secs),
            ("prompt.timeout_secs", self.prompt.timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::Invalid(format!("{key} must be greater than zero")));
            }
        }
        if self.embeddings.api_key.is_none() {
            return Err(ConfigError::MissingApiKey("embeddings"));
        }
        if self.llm.api_key.is_none() {
            return Err(ConfigError::MissingApiKey("llm"));
        }
        Ok(())
    }

    pub fn embeddings_api_key(&self) -> &str {
        self.embeddings.api_key.as_deref().unwrap_or_default()
    }

    pub fn llm_api_key(&self) -> &str {
        self.llm.api_key.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("missing API key for {0}: set {0}.api_key or OPENAI_API_KEY")]
    MissingApiKey(&'static str),
    #[error("invalid prompt template: {0}")]
    Template(String),
}
