use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::{Chunk, ChunkSource, Page};

use super::sliding_window_splitter::validate;

const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Like the sliding window, but prefers to end a chunk on a paragraph, line,
/// sentence or word boundary found in the last quarter of the window. The next
/// chunk still starts exactly `chunk_overlap` characters before the previous
/// end.
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, TextSplitterError> {
        validate(chunk_size, chunk_overlap)?;
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    fn chunk_end(&self, chars: &[char], start: usize) -> usize {
        let hard_end = (start + self.chunk_size).min(chars.len());
        if hard_end == chars.len() {
            return hard_end;
        }

        let window_floor = start + self.chunk_size - self.chunk_size / 4;
        let floor = window_floor.max(start + self.chunk_overlap + 1);

        SEPARATORS
            .iter()
            .find_map(|sep| last_boundary(chars, floor, hard_end, sep))
            .unwrap_or(hard_end)
    }
}

/// End index just past the last occurrence of `sep` lying wholly inside
/// `chars[from..to]`.
fn last_boundary(chars: &[char], from: usize, to: usize, sep: &str) -> Option<usize> {
    let sep: Vec<char> = sep.chars().collect();
    if to < from + sep.len() {
        return None;
    }
    (from..=to - sep.len())
        .rev()
        .find(|&i| chars[i..i + sep.len()] == sep[..])
        .map(|i| i + sep.len())
}

#[async_trait]
impl TextSplitter for RecursiveCharacterSplitter {
    async fn split(&self, page: &Page) -> Result<Vec<Chunk>, TextSplitterError> {
        let chars: Vec<char> = page.text.chars().collect();
        let mut chunks = Vec::new();

        let mut start = 0;
        while start < chars.len() {
            let end = self.chunk_end(&chars, start);
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

            if end == chars.len() {
                break;
            }
            start = end - self.chunk_overlap;
        }

        Ok(chunks)
    }
}
