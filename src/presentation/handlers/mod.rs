mod ask;
mod documents;
mod error;
mod health;
mod history;

pub use ask::{AskRequest, AskResponse, SourceResponse, ask_handler};
pub use documents::{FileReport, UploadResponse, upload_documents_handler};
pub use error::{ErrorResponse, ask_status, error_response, ingestion_status};
pub use health::{HealthResponse, health_handler};
pub use history::{TurnResponse, history_handler};
