use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{FileOutcome, UploadedFile};
use crate::presentation::state::AppState;

use super::error::error_response;

const FILE_FIELDS: [&str; 2] = ["file", "files"];

#[derive(Serialize)]
pub struct UploadResponse {
    pub files: Vec<FileReport>,
    pub documents: usize,
    pub pages: usize,
    pub chunks: usize,
}

#[derive(Serialize)]
pub struct FileReport {
    pub file_name: String,
    pub stored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<FileOutcome> for FileReport {
    fn from(outcome: FileOutcome) -> Self {
        Self {
            stored: outcome.is_stored(),
            error: outcome.error(),
            file_name: outcome.file_name,
        }
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_documents_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut files = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "bad_request",
                    format!("failed to read multipart: {e}"),
                );
            }
        };

        if !field.name().is_some_and(|name| FILE_FIELDS.contains(&name)) {
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            return error_response(
                StatusCode::BAD_REQUEST,
                "bad_request",
                "file field without a file name",
            );
        };

        match field.bytes().await {
            Ok(data) => {
                tracing::debug!(file = %file_name, bytes = data.len(), "File received");
                files.push(UploadedFile::new(file_name, data));
            }
            Err(e) => {
                tracing::warn!(file = %file_name, error = %e, "Failed to read file bytes");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "bad_request",
                    format!("failed to read {file_name}: {e}"),
                );
            }
        }
    }

    match state.ingestion_service.upload(files).await {
        Ok(report) => {
            tracing::info!(
                files = report.files.len(),
                chunks = report.summary.chunk_count,
                "Upload indexed"
            );
            (
                StatusCode::OK,
                Json(UploadResponse {
                    files: report.files.into_iter().map(FileReport::from).collect(),
                    documents: report.summary.document_count,
                    pages: report.summary.page_count,
                    chunks: report.summary.chunk_count,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Upload failed");
            e.into_response()
        }
    }
}
