use uuid::Uuid;

use super::DocumentId;

/// A contiguous slice of one page's text, the unit of embedding and retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    pub source: ChunkSource,
    pub target_len: usize,
    pub overlap: usize,
}

/// Where a chunk came from. Offsets count characters within the page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSource {
    pub document_id: DocumentId,
    pub page: u32,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(Uuid);

impl ChunkId {
    /// Derives the id from the chunk's position so re-chunking the same input
    /// reproduces the same ids.
    pub fn for_source(source: &ChunkSource) -> Self {
        let name = format!(
            "{}/{}/{}",
            source.document_id.as_str(),
            source.page,
            source.start
        );
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Chunk {
    pub fn new(text: String, source: ChunkSource, target_len: usize, overlap: usize) -> Self {
        Self {
            id: ChunkId::for_source(&source),
            text,
            source,
            target_len,
            overlap,
        }
    }

    pub fn char_len(&self) -> usize {
        self.source.end - self.source.start
    }
}
