use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::VectorStore;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_chunks: Option<usize>,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let indexed_chunks = state.vector_store.len().await.ok();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            indexed_chunks,
        }),
    )
}
