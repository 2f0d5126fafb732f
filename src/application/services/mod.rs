mod answer_composer;
mod document_loader;
mod indexer;
mod ingestion_service;
mod qa_service;
mod retriever;
mod token_counter;

pub use answer_composer::{AnswerComposer, CompositionError};
pub use document_loader::{DocumentLoader, FileFailure, LoadError, ParseFailures};
pub use indexer::{IndexError, Indexer};
pub use ingestion_service::{
    FileOutcome, FileStatus, IndexSummary, IngestionError, IngestionReport, IngestionService,
    UploadedFile,
};
pub use qa_service::{AskError, QaAnswer, QaService, SourceChunk};
pub use retriever::{DEFAULT_TOP_K, RetrievalError, Retriever};
pub use token_counter::count_tokens;
