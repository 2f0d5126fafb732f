use std::path::{Path, PathBuf};

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{UploadStore, UploadStoreError, sanitize_file_name};

/// Writes uploads into the documents directory. Files are written to a
/// temporary name and renamed into place by `object_store`, so a reader never
/// sees a half-written PDF.
pub struct LocalUploadStore {
    root: PathBuf,
    inner: LocalFileSystem,
}

impl LocalUploadStore {
    pub fn new(root: PathBuf) -> Result<Self, UploadStoreError> {
        std::fs::create_dir_all(&root)?;
        let root = std::fs::canonicalize(root)?;
        let inner = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| UploadStoreError::WriteFailed(e.to_string()))?;
        Ok(Self { root, inner })
    }

    fn location(&self, file_name: &str) -> Result<(String, StorePath), UploadStoreError> {
        let name = sanitize_file_name(file_name)?;
        let location = StorePath::from(name.as_str());
        Ok((name, location))
    }
}

#[async_trait::async_trait]
impl UploadStore for LocalUploadStore {
    async fn store(&self, file_name: &str, data: Bytes) -> Result<PathBuf, UploadStoreError> {
        let (name, location) = self.location(file_name)?;

        self.inner
            .put(&location, PutPayload::from(data))
            .await
            .map_err(|e| UploadStoreError::WriteFailed(format!("{name}: {e}")))?;

        self.inner
            .path_to_filesystem(&location)
            .map_err(|e| UploadStoreError::WriteFailed(format!("{name}: {e}")))
    }

    async fn remove(&self, file_name: &str) -> Result<(), UploadStoreError> {
        let (name, location) = self.location(file_name)?;
        match self.inner.delete(&location).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(UploadStoreError::WriteFailed(format!("{name}: {e}"))),
        }
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
