use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::Mutex;

use crate::application::ports::{
    FileLoader, TextSplitter, TextSplitterError, UploadStore, UploadStoreError,
    sanitize_file_name,
};
use crate::domain::Page;

use super::{DocumentLoader, IndexError, Indexer, LoadError};

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Stored,
    Failed(String),
    /// Not kept because another file in the same batch failed.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub file_name: String,
    pub status: FileStatus,
}

impl FileOutcome {
    fn new(file_name: impl Into<String>, status: FileStatus) -> Self {
        Self {
            file_name: file_name.into(),
            status,
        }
    }

    pub fn is_stored(&self) -> bool {
        self.status == FileStatus::Stored
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed(_))
    }

    pub fn error(&self) -> Option<String> {
        match &self.status {
            FileStatus::Stored => None,
            FileStatus::Failed(reason) => Some(reason.clone()),
            FileStatus::Discarded => Some("discarded: batch aborted".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexSummary {
    pub document_count: usize,
    pub page_count: usize,
    pub chunk_count: usize,
}

#[derive(Debug, Clone)]
pub struct IngestionReport {
    pub files: Vec<FileOutcome>,
    pub summary: IndexSummary,
}

/// Stores uploads and rebuilds the whole index from the documents directory.
///
/// Rebuilds are serialised: the lock is held from the first write to the
/// upload store until the new index has been published, so two batches never
/// interleave. Queries keep reading the previous index meanwhile.
pub struct IngestionService {
    upload_store: Arc<dyn UploadStore>,
    document_loader: DocumentLoader,
    text_splitter: Arc<dyn TextSplitter>,
    indexer: Indexer,
    rebuild_lock: Mutex<()>,
}

impl IngestionService {
    pub fn new(
        upload_store: Arc<dyn UploadStore>,
        file_loader: Arc<dyn FileLoader>,
        text_splitter: Arc<dyn TextSplitter>,
        indexer: Indexer,
    ) -> Self {
        Self {
            upload_store,
            document_loader: DocumentLoader::new(file_loader),
            text_splitter,
            indexer,
            rebuild_lock: Mutex::new(()),
        }
    }

    /// Either every file of the batch ends up in the documents directory and
    /// the index is rebuilt, or none of them is kept.
    #[tracing::instrument(skip(self, files), fields(file_count = files.len()))]
    pub async fn upload(&self, files: Vec<UploadedFile>) -> Result<IngestionReport, IngestionError> {
        if files.is_empty() {
            return Err(IngestionError::EmptyBatch);
        }

        let names: Vec<Result<String, UploadStoreError>> = files
            .iter()
            .map(|f| sanitize_file_name(&f.file_name))
            .collect();
        if names.iter().any(Result::is_err) {
            let outcomes = files
                .iter()
                .zip(names)
                .map(|(file, name)| match name {
                    Ok(name) => FileOutcome::new(name, FileStatus::Discarded),
                    Err(e) => FileOutcome::new(file.file_name.clone(), FileStatus::Failed(e.to_string())),
                })
                .collect::<Vec<_>>();
            tracing::warn!(file_count = outcomes.len(), "Rejected batch with unusable file names");
            return Err(IngestionError::Upload(outcomes));
        }

        let _guard = self.rebuild_lock.lock().await;

        let mut outcomes = Vec::with_capacity(files.len());
        for (file, name) in files.into_iter().zip(names.into_iter().flatten()) {
            let size = file.data.len();
            let status = match self.upload_store.store(&name, file.data).await {
                Ok(path) => {
                    tracing::info!(file = %name, bytes = size, path = %path.display(), "File stored");
                    FileStatus::Stored
                }
                Err(e) => {
                    tracing::error!(file = %name, error = %e, "Failed to store upload");
                    FileStatus::Failed(e.to_string())
                }
            };
            outcomes.push(FileOutcome::new(name, status));
        }

        if outcomes.iter().any(FileOutcome::is_failed) {
            self.discard_batch(&mut outcomes).await;
            return Err(IngestionError::Upload(outcomes));
        }

        match self.rebuild_locked().await {
            Ok(summary) => Ok(IngestionReport {
                files: outcomes,
                summary,
            }),
            Err(e) => {
                self.discard_batch(&mut outcomes).await;
                Err(e)
            }
        }
    }

    /// Rebuilds the index from whatever is already in the documents directory.
    pub async fn rebuild_index(&self) -> Result<IndexSummary, IngestionError> {
        let _guard = self.rebuild_lock.lock().await;
        self.rebuild_locked().await
    }

    async fn rebuild_locked(&self) -> Result<IndexSummary, IngestionError> {
        let documents = self
            .document_loader
            .load_directory(self.upload_store.root())
            .await?;

        let pages: Vec<Page> = documents.iter().flat_map(|d| d.pages.clone()).collect();

        let chunks = self
            .text_splitter
            .split_pages(&pages)
            .await
            .map_err(IngestionError::Splitting)?;

        let chunk_count = self.indexer.rebuild(chunks).await?;

        let summary = IndexSummary {
            document_count: documents.len(),
            page_count: pages.len(),
            chunk_count,
        };
        tracing::info!(
            documents = summary.document_count,
            pages = summary.page_count,
            chunks = summary.chunk_count,
            "Ingestion completed"
        );
        Ok(summary)
    }

    /// Removes the files this batch stored, so a later rebuild does not
    /// pick up documents from a batch that was reported as failed.
    async fn discard_batch(&self, outcomes: &mut [FileOutcome]) {
        for outcome in outcomes.iter_mut().filter(|o| o.is_stored()) {
            match self.upload_store.remove(&outcome.file_name).await {
                Ok(()) => outcome.status = FileStatus::Discarded,
                Err(e) => {
                    tracing::warn!(file = %outcome.file_name, error = %e, "Failed to discard upload")
                }
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("no files in upload batch")]
    EmptyBatch,
    #[error("failed to store {} file(s)", .0.iter().filter(|o| o.is_failed()).count())]
    Upload(Vec<FileOutcome>),
    #[error("loading: {0}")]
    Load(#[from] LoadError),
    #[error("text splitting: {0}")]
    Splitting(TextSplitterError),
    #[error("indexing: {0}")]
    Index(#[from] IndexError),
}

impl IngestionError {
    /// Names of the files responsible for the failure, if it is file specific.
    pub fn failed_files(&self) -> Vec<String> {
        match self {
            IngestionError::Upload(outcomes) => outcomes
                .iter()
                .filter(|o| o.is_failed())
                .map(|o| o.file_name.clone())
                .collect(),
            IngestionError::Load(LoadError::Parse(failures)) => {
                failures.0.iter().map(|f| f.file_name.clone()).collect()
            }
            _ => Vec::new(),
        }
    }
}
