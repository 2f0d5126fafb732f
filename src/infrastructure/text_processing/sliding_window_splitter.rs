use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::{Chunk, ChunkSource, Page};

/// Fixed-size character windows: chunk `k` starts at `k * (size - overlap)`.
/// The last window is clipped at the end of the page, and no window starts
/// once one has reached the end.
pub struct SlidingWindowSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl SlidingWindowSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, TextSplitterError> {
        validate(chunk_size, chunk_overlap)?;
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }
}

pub(super) fn validate(chunk_size: usize, chunk_overlap: usize) -> Result<(), TextSplitterError> {
    if chunk_size == 0 {
        return Err(TextSplitterError::InvalidConfiguration(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    if chunk_overlap >= chunk_size {
        return Err(TextSplitterError::InvalidConfiguration(format!(
            "chunk overlap ({chunk_overlap}) must be smaller than chunk size ({chunk_size})"
        )));
    }
    Ok(())
}

#[async_trait]
impl TextSplitter for SlidingWindowSplitter {
    async fn split(&self, page: &Page) -> Result<Vec<Chunk>, TextSplitterError> {
        let chars: Vec<char> = page.text.chars().collect();
        let total_len = chars.len();
        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();

        let mut start = 0;
        while start < total_len {
            let end = (start + self.chunk_size).min(total_len);
            let source = ChunkSource {
                document_id: page.document_id.clone(),
                page: page.index,
                start,
                end,
            };
            let overlap = if chunks.is_empty() { 0 } else { self.chunk_overlap };
            chunks.push(Chunk::new(
                chars[start..end].iter().collect(),
                source,
                self.chunk_size,
                overlap,
            ));

            if end == total_len {
                break;
            }
            start += step;
        }

        Ok(chunks)
    }
}
