use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{ConversationLog, ConversationLogError};
use crate::domain::ConversationTurn;

/// Append-only session history. Lives as long as the process.
#[derive(Default)]
pub struct InMemoryConversationLog {
    turns: RwLock<Vec<ConversationTurn>>,
}

impl InMemoryConversationLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationLog for InMemoryConversationLog {
    async fn append(&self, turn: ConversationTurn) -> Result<(), ConversationLogError> {
        let mut turns = self.turns.write().await;
        turns.push(turn);
        tracing::debug!(turns = turns.len(), "Conversation turn recorded");
        Ok(())
    }

    async fn history(&self) -> Result<Vec<ConversationTurn>, ConversationLogError> {
        Ok(self.turns.read().await.clone())
    }

    async fn len(&self) -> Result<usize, ConversationLogError> {
        Ok(self.turns.read().await.len())
    }
}
