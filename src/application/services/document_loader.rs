use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::FileLoader;
use crate::domain::{Document, DocumentId, Page};

const PDF_EXTENSION: &str = "pdf";

/// Reads every PDF in a directory into page records.
pub struct DocumentLoader {
    file_loader: Arc<dyn FileLoader>,
}

impl DocumentLoader {
    pub fn new(file_loader: Arc<dyn FileLoader>) -> Self {
        Self { file_loader }
    }

    /// Loads all PDFs in `dir`, ordered by file name. Every file is attempted;
    /// if any of them fails the whole load fails and lists each failure.
    #[tracing::instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub async fn load_directory(&self, dir: &Path) -> Result<Vec<Document>, LoadError> {
        let paths = pdf_paths(dir).await?;
        tracing::debug!(pdf_count = paths.len(), "Found PDF files");

        let mut documents = Vec::with_capacity(paths.len());
        let mut failures = Vec::new();

        for path in paths {
            let file_name = file_name_of(&path);
            let document_id = DocumentId::new(file_name.clone());

            match self.file_loader.extract_pages(&path, &document_id).await {
                Ok(pages) => {
                    tracing::debug!(file = %file_name, page_count = pages.len(), "Loaded PDF");
                    documents.push(Document::new(document_id, pages));
                }
                Err(e) => {
                    tracing::warn!(file = %file_name, error = %e, "Failed to parse PDF");
                    failures.push(FileFailure {
                        file_name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !failures.is_empty() {
            return Err(LoadError::Parse(ParseFailures(failures)));
        }

        Ok(documents)
    }

    /// Same as [`load_directory`](Self::load_directory) flattened into pages.
    pub async fn load_pages(&self, dir: &Path) -> Result<Vec<Page>, LoadError> {
        Ok(self
            .load_directory(dir)
            .await?
            .into_iter()
            .flat_map(|d| d.pages)
            .collect())
    }
}

async fn pdf_paths(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_error = |source: io::Error| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let metadata = tokio::fs::metadata(dir).await.map_err(io_error)?;
    if !metadata.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()));
    }

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_error)?;
    let mut paths = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        let path = entry.path();
        if !is_pdf(&path) {
            continue;
        }
        // Follows symlinks, unlike DirEntry::file_type.
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if is_file {
            paths.push(path);
        }
    }

    paths.sort_by_key(|p| file_name_of(p));
    Ok(paths)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(PDF_EXTENSION))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailures(pub Vec<FileFailure>);

impl ParseFailures {
    pub fn file_names(&self) -> Vec<&str> {
        self.0.iter().map(|f| f.file_name.as_str()).collect()
    }
}

impl fmt::Display for ParseFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", failure.file_name, failure.reason)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("unparsable PDF files: {0}")]
    Parse(ParseFailures),
}
