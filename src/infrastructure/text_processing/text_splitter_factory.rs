use std::sync::Arc;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::presentation::config::ChunkingStrategy;

use super::{RecursiveCharacterSplitter, SlidingWindowSplitter};

pub struct TextSplitterFactory;

impl TextSplitterFactory {
    pub fn create(
        strategy: ChunkingStrategy,
        chunk_size: usize,
        overlap: usize,
    ) -> Result<Arc<dyn TextSplitter>, TextSplitterError> {
        let splitter: Arc<dyn TextSplitter> = match strategy {
            ChunkingStrategy::Fixed => Arc::new(SlidingWindowSplitter::new(chunk_size, overlap)?),
            ChunkingStrategy::Recursive => {
                Arc::new(RecursiveCharacterSplitter::new(chunk_size, overlap)?)
            }
        };
        Ok(splitter)
    }
}
