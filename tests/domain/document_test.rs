use pdfrag::domain::{Document, DocumentId, Page};

#[test]
fn given_file_name_when_creating_document_id_then_displays_the_name() {
    let id = DocumentId::new("lecture-01.pdf");
    assert_eq!(id.as_str(), "lecture-01.pdf");
    assert_eq!(id.to_string(), "lecture-01.pdf");
}

#[test]
fn given_pages_when_creating_document_then_page_count_matches() {
    let id = DocumentId::new("a.pdf");
    let pages = vec![
        Page::new(id.clone(), 0, "first".to_string()),
        Page::new(id.clone(), 2, "third".to_string()),
    ];
    let document = Document::new(id, pages);
    assert_eq!(document.page_count(), 2);
    assert_eq!(document.pages[1].index, 2);
}

#[test]
fn given_document_ids_when_sorting_then_orders_by_file_name() {
    let mut ids = vec![DocumentId::new("b.pdf"), DocumentId::new("a.pdf")];
    ids.sort();
    assert_eq!(ids[0].as_str(), "a.pdf");
}
