mod repositories;
mod vector_store;

pub use repositories::InMemoryConversationLog;
pub use vector_store::InMemoryVectorStore;
