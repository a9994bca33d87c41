use klaksvik::application::ports::{DocumentTextError, DocumentTextSource};
use klaksvik::infrastructure::text_processing::PdfTextAdapter;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Builds a single-page PDF with one text run, so the fixtures live in
/// code instead of binary files.
fn pdf_with_text(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn pdf_without_text() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content = Content { operations: vec![] };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

#[tokio::test]
async fn given_pdf_with_text_layer_when_reading_pages_then_text_is_returned() {
    let adapter = PdfTextAdapter::new();
    let data = pdf_with_text("Hello from the text layer");

    let pages = adapter.page_texts(&data).await.unwrap();

    assert_eq!(pages.len(), 1);
    assert!(pages[0].contains("Hello from the text layer"));
}

#[tokio::test]
async fn given_pdf_without_text_ops_when_reading_pages_then_page_is_blank() {
    let adapter = PdfTextAdapter::new();
    let data = pdf_without_text();

    let pages = adapter.page_texts(&data).await.unwrap();

    assert_eq!(pages.len(), 1);
    assert!(pages[0].trim().is_empty());
}

#[tokio::test]
async fn given_garbage_bytes_when_reading_pages_then_parse_error_is_returned() {
    let adapter = PdfTextAdapter::new();

    let result = adapter.page_texts(b"definitely not a pdf").await;

    assert!(matches!(result, Err(DocumentTextError::Parse(_))));
}

#[tokio::test]
async fn given_empty_input_when_reading_pages_then_parse_error_is_returned() {
    let adapter = PdfTextAdapter::new();

    let result = adapter.page_texts(b"").await;

    assert!(matches!(result, Err(DocumentTextError::Parse(_))));
}
