use async_trait::async_trait;

use crate::domain::ConversationTurn;

#[async_trait]
pub trait ConversationLog: Send + Sync {
    async fn append(&self, turn: ConversationTurn) -> Result<(), ConversationLogError>;

    /// All turns in the order they were appended.
    async fn history(&self) -> Result<Vec<ConversationTurn>, ConversationLogError>;

    async fn len(&self) -> Result<usize, ConversationLogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ConversationLogError {
    #[error("append failed: {0}")]
    AppendFailed(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
}
