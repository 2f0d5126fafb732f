mod in_memory_conversation_log;

pub use in_memory_conversation_log::InMemoryConversationLog;
