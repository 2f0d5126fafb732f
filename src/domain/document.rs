use std::fmt;

use super::Page;

/// Documents are identified by their file name inside the documents directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self(file_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(id: DocumentId, pages: Vec<Page>) -> Self {
        Self { id, pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
