use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{ConversationTurn, MessageRole};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TurnResponse {
    pub id: Uuid,
    pub role: MessageRole,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl From<ConversationTurn> for TurnResponse {
    fn from(turn: ConversationTurn) -> Self {
        Self {
            id: turn.id.as_uuid(),
            role: turn.role,
            question: turn.question,
            answer: turn.answer,
            created_at: turn.created_at,
        }
    }
}

pub async fn history_handler(State(state): State<AppState>) -> Response {
    match state.qa_service.history().await {
        Ok(turns) => {
            let body: Vec<TurnResponse> = turns.into_iter().map(TurnResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
