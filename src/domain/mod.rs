mod chunk;
mod conversation_turn;
mod document;
mod embedding;
mod interaction_phase;
mod message_role;
mod page;
mod vector_record;

pub use chunk::{Chunk, ChunkId, ChunkSource};
pub use conversation_turn::{ConversationTurn, TurnId};
pub use document::{Document, DocumentId};
pub use embedding::Embedding;
pub use interaction_phase::InteractionPhase;
pub use message_role::MessageRole;
pub use page::Page;
pub use vector_record::VectorRecord;
