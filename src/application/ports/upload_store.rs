use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;

#[async_trait::async_trait]
pub trait UploadStore: Send + Sync {
    /// Persists one uploaded file, overwriting any file with the same name.
    async fn store(&self, file_name: &str, data: Bytes) -> Result<PathBuf, UploadStoreError>;

    async fn remove(&self, file_name: &str) -> Result<(), UploadStoreError>;

    /// Directory the stored files land in.
    fn root(&self) -> &Path;
}

/// Keeps only the final path component of a client supplied file name.
pub fn sanitize_file_name(file_name: &str) -> Result<String, UploadStoreError> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(UploadStoreError::InvalidFileName(file_name.to_string()));
    }
    Ok(name.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum UploadStoreError {
    #[error("invalid file name: {0:?}")]
    InvalidFileName(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
