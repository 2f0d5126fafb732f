use std::sync::Arc;

use crate::application::ports::{ConversationLog, ConversationLogError};
use crate::domain::{ConversationTurn, DocumentId, InteractionPhase};

use super::{AnswerComposer, CompositionError, RetrievalError, Retriever};

#[derive(Debug, Clone)]
pub struct QaAnswer {
    pub answer: String,
    pub sources: Vec<SourceChunk>,
}

#[derive(Debug, Clone)]
pub struct SourceChunk {
    pub document_id: DocumentId,
    pub page: u32,
    pub text: String,
    pub score: f32,
}

/// Runs one question through retrieval and generation and records the round.
pub struct QaService {
    retriever: Retriever,
    composer: AnswerComposer,
    conversation_log: Arc<dyn ConversationLog>,
}

impl QaService {
    pub fn new(
        retriever: Retriever,
        composer: AnswerComposer,
        conversation_log: Arc<dyn ConversationLog>,
    ) -> Self {
        Self {
            retriever,
            composer,
            conversation_log,
        }
    }

    /// A turn is appended only when both retrieval and generation succeed.
    #[tracing::instrument(skip(self, question))]
    pub async fn ask(&self, question: &str) -> Result<QaAnswer, AskError> {
        let mut phase = InteractionPhase::Idle;
        advance(&mut phase);

        let question = question.trim();
        if question.is_empty() {
            reset(&mut phase);
            return Err(AskError::EmptyQuestion);
        }

        advance(&mut phase);
        let results = match self.retriever.retrieve(question).await {
            Ok(results) => results,
            Err(e) => {
                reset(&mut phase);
                return Err(AskError::Retrieval(e));
            }
        };

        advance(&mut phase);
        let answer = match self.composer.compose(question, &results).await {
            Ok(answer) => answer,
            Err(e) => {
                reset(&mut phase);
                return Err(AskError::Composition(e));
            }
        };

        advance(&mut phase);
        let append = self
            .conversation_log
            .append(ConversationTurn::new(question.to_string(), answer.clone()))
            .await;
        advance(&mut phase);
        append.map_err(AskError::Log)?;

        let sources = results
            .into_iter()
            .map(|r| SourceChunk {
                document_id: r.chunk.source.document_id,
                page: r.chunk.source.page,
                text: r.chunk.text,
                score: r.score,
            })
            .collect();

        Ok(QaAnswer { answer, sources })
    }

    pub async fn history(&self) -> Result<Vec<ConversationTurn>, AskError> {
        self.conversation_log.history().await.map_err(AskError::Log)
    }
}

fn advance(phase: &mut InteractionPhase) {
    let next = phase.next();
    tracing::debug!(from = %phase, to = %next, "Interaction phase transition");
    *phase = next;
}

fn reset(phase: &mut InteractionPhase) {
    tracing::debug!(from = %phase, to = %InteractionPhase::Idle, "Interaction aborted");
    *phase = InteractionPhase::Idle;
}

#[derive(Debug, thiserror::Error)]
pub enum AskError {
    #[error("question is empty")]
    EmptyQuestion,
    #[error("retrieval: {0}")]
    Retrieval(RetrievalError),
    #[error("composition: {0}")]
    Composition(CompositionError),
    #[error("conversation log: {0}")]
    Log(ConversationLogError),
}
