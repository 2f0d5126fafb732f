#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("invalid vector for chunk {0}: contains NaN or infinite values")]
    InvalidVector(String),
    #[error("rebuild failed: {0}")]
    RebuildFailed(String),
    #[error("search failed: {0}")]
    SearchFailed(String),
}
