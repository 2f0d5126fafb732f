use bytes::Bytes;

use pdfrag::application::ports::{UploadStore, UploadStoreError, sanitize_file_name};
use pdfrag::infrastructure::storage::LocalUploadStore;

fn create_test_store() -> (tempfile::TempDir, LocalUploadStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalUploadStore::new(dir.path().join("documents")).unwrap();
    (dir, store)
}

#[tokio::test]
async fn given_upload_when_storing_then_file_lands_in_documents_dir() {
    let (_dir, store) = create_test_store();

    let path = store.store("notes.pdf", Bytes::from("%PDF-1.4")).await.unwrap();

    assert_eq!(path, store.root().join("notes.pdf"));
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
}

#[tokio::test]
async fn given_path_like_name_when_storing_then_keeps_only_final_component() {
    let (_dir, store) = create_test_store();

    let path = store
        .store("../../etc/evil.pdf", Bytes::from("data"))
        .await
        .unwrap();

    assert_eq!(path, store.root().join("evil.pdf"));
}

#[tokio::test]
async fn given_duplicate_name_when_storing_then_overwrites_silently() {
    let (_dir, store) = create_test_store();
    store.store("a.pdf", Bytes::from("first")).await.unwrap();

    let path = store.store("a.pdf", Bytes::from("second")).await.unwrap();

    assert_eq!(std::fs::read(path).unwrap(), b"second");
}

#[tokio::test]
async fn given_stored_file_when_removing_then_file_is_gone() {
    let (_dir, store) = create_test_store();
    let path = store.store("a.pdf", Bytes::from("x")).await.unwrap();

    store.remove("a.pdf").await.unwrap();
    store.remove("a.pdf").await.unwrap();

    assert!(!path.exists());
}

#[test]
fn given_empty_or_directory_names_when_sanitizing_then_rejects() {
    for name in ["", "   ", "uploads/", "..", "a\\."] {
        assert!(
            matches!(sanitize_file_name(name), Err(UploadStoreError::InvalidFileName(_))),
            "{name:?} should be rejected"
        );
    }
    assert_eq!(sanitize_file_name("C:\\docs\\report.pdf").unwrap(), "report.pdf");
}
