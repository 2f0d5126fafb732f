mod openai_chat_client;
mod openai_embedder;
mod retry;

pub use openai_chat_client::{ChatClientOptions, OpenAiChatClient};
pub use openai_embedder::OpenAiEmbedder;
pub use retry::RetryPolicy;
