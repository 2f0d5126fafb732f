use super::DocumentId;

/// Extracted text of one PDF page. `index` is zero-based and follows the
/// page order of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub document_id: DocumentId,
    pub index: u32,
    pub text: String,
}

impl Page {
    pub fn new(document_id: DocumentId, index: u32, text: String) -> Self {
        Self {
            document_id,
            index,
            text,
        }
    }
}
