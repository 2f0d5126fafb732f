use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub sources: Vec<SourceResponse>,
}

#[derive(Serialize)]
pub struct SourceResponse {
    pub document: String,
    pub page: u32,
    pub text: String,
    pub score: f32,
}

#[tracing::instrument(skip(state, request))]
pub async fn ask_handler(State(state): State<AppState>, Json(request): Json<AskRequest>) -> Response {
    tracing::debug!(question = %sanitize_prompt(&request.question), "Processing question");

    match state.qa_service.ask(&request.question).await {
        Ok(answer) => {
            tracing::info!(sources_count = answer.sources.len(), "Question answered");
            let sources = answer
                .sources
                .into_iter()
                .map(|s| SourceResponse {
                    document: s.document_id.to_string(),
                    page: s.page,
                    text: s.text,
                    score: s.score,
                })
                .collect();
            (
                StatusCode::OK,
                Json(AskResponse {
                    answer: answer.answer,
                    sources,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Question failed");
            e.into_response()
        }
    }
}
