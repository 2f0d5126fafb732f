use super::{Chunk, Embedding};

#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    pub chunk: Chunk,
    pub embedding: Embedding,
}

impl VectorRecord {
    pub fn new(chunk: Chunk, embedding: Embedding) -> Self {
        Self { chunk, embedding }
    }
}
