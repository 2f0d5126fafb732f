use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::MessageRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnId(Uuid);

impl TurnId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

/// One completed question/answer round. The role tags who asked.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub id: TurnId,
    pub role: MessageRole,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(question: String, answer: String) -> Self {
        Self {
            id: TurnId::new(),
            role: MessageRole::User,
            question,
            answer,
            created_at: Utc::now(),
        }
    }
}
