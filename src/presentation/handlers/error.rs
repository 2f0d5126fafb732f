use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{
    AskError, IndexError, IngestionError, LoadError, RetrievalError,
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

pub fn error_response(status: StatusCode, kind: &'static str, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            kind,
            files: Vec::new(),
        }),
    )
        .into_response()
}

pub fn ingestion_status(error: &IngestionError) -> (StatusCode, &'static str) {
    match error {
        IngestionError::EmptyBatch => (StatusCode::BAD_REQUEST, "empty_batch"),
        IngestionError::Upload(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
        IngestionError::Load(LoadError::Parse(_)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "parse_error")
        }
        IngestionError::Load(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
        IngestionError::Splitting(_) => (StatusCode::INTERNAL_SERVER_ERROR, "chunking_error"),
        IngestionError::Index(IndexError::Embedding(_)) => {
            (StatusCode::BAD_GATEWAY, "embedding_error")
        }
        IngestionError::Index(IndexError::Storage(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "index_error")
        }
    }
}

pub fn ask_status(error: &AskError) -> (StatusCode, &'static str) {
    match error {
        AskError::EmptyQuestion => (StatusCode::BAD_REQUEST, "empty_question"),
        AskError::Retrieval(RetrievalError::EmptyIndex) => (StatusCode::CONFLICT, "empty_index"),
        AskError::Retrieval(RetrievalError::Embedding(_)) => {
            (StatusCode::BAD_GATEWAY, "embedding_error")
        }
        AskError::Retrieval(RetrievalError::Search(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "index_error")
        }
        AskError::Composition(_) => (StatusCode::BAD_GATEWAY, "generation_error"),
        AskError::Log(_) => (StatusCode::INTERNAL_SERVER_ERROR, "session_error"),
    }
}

impl IntoResponse for IngestionError {
    fn into_response(self) -> Response {
        let (status, kind) = ingestion_status(&self);
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                kind,
                files: self.failed_files(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AskError {
    fn into_response(self) -> Response {
        let (status, kind) = ask_status(&self);
        error_response(status, kind, self.to_string())
    }
}
