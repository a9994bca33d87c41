use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use klaksvik::application::ports::{
    DetectedLabel, DetectedObject, DocumentTextError, DocumentTextSource, TextRepair,
    VisionAnalysis, VisionAnalysisError,
};
use klaksvik::application::services::ExtractionService;
use klaksvik::domain::{ExtractionStrategy, SourceDocument};
use klaksvik::infrastructure::text_processing::MirroredHebrewRepair;

struct StubDocumentText {
    /// `None` simulates a parse failure.
    pages: Option<Vec<String>>,
    calls: AtomicUsize,
}

impl StubDocumentText {
    fn with_pages(pages: Vec<&str>) -> Self {
        Self {
            pages: Some(pages.into_iter().map(str::to_string).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            pages: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentTextSource for StubDocumentText {
    async fn page_texts(&self, _data: &[u8]) -> Result<Vec<String>, DocumentTextError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.pages {
            Some(pages) => Ok(pages.clone()),
            None => Err(DocumentTextError::Parse("synthetic parse failure".to_string())),
        }
    }
}

type VisionReply<T> = Result<T, String>;

struct StubVision {
    document_text: VisionReply<Option<String>>,
    text: VisionReply<Option<String>>,
    objects: VisionReply<Vec<DetectedObject>>,
    labels: VisionReply<Vec<DetectedLabel>>,
    document_text_calls: AtomicUsize,
    text_calls: AtomicUsize,
    object_calls: AtomicUsize,
    label_calls: AtomicUsize,
}

impl Default for StubVision {
    fn default() -> Self {
        Self {
            document_text: Ok(None),
            text: Ok(None),
            objects: Ok(Vec::new()),
            labels: Ok(Vec::new()),
            document_text_calls: AtomicUsize::new(0),
            text_calls: AtomicUsize::new(0),
            object_calls: AtomicUsize::new(0),
            label_calls: AtomicUsize::new(0),
        }
    }
}

fn transport(message: &str) -> VisionAnalysisError {
    VisionAnalysisError::Transport(message.to_string())
}

#[async_trait]
impl VisionAnalysis for StubVision {
    async fn detect_document_text(
        &self,
        _content: &[u8],
    ) -> Result<Option<String>, VisionAnalysisError> {
        self.document_text_calls.fetch_add(1, Ordering::SeqCst);
        self.document_text.clone().map_err(|m| transport(&m))
    }

    async fn detect_text(&self, _content: &[u8]) -> Result<Option<String>, VisionAnalysisError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.text.clone().map_err(|m| transport(&m))
    }

    async fn localize_objects(
        &self,
        _content: &[u8],
    ) -> Result<Vec<DetectedObject>, VisionAnalysisError> {
        self.object_calls.fetch_add(1, Ordering::SeqCst);
        self.objects.clone().map_err(|m| transport(&m))
    }

    async fn detect_labels(
        &self,
        _content: &[u8],
    ) -> Result<Vec<DetectedLabel>, VisionAnalysisError> {
        self.label_calls.fetch_add(1, Ordering::SeqCst);
        self.labels.clone().map_err(|m| transport(&m))
    }
}

fn objects(names: &[&str]) -> Vec<DetectedObject> {
    names
        .iter()
        .map(|name| DetectedObject {
            name: name.to_string(),
            score: 0.9,
        })
        .collect()
}

fn labels(descriptions: &[&str]) -> Vec<DetectedLabel> {
    descriptions
        .iter()
        .map(|description| DetectedLabel {
            description: description.to_string(),
            score: 0.8,
        })
        .collect()
}

fn service(
    document_text: StubDocumentText,
    vision: StubVision,
) -> (
    ExtractionService<StubDocumentText, StubVision>,
    Arc<StubDocumentText>,
    Arc<StubVision>,
) {
    let document_text = Arc::new(document_text);
    let vision = Arc::new(vision);
    let repair: Arc<dyn TextRepair> = Arc::new(MirroredHebrewRepair::new());
    let service = ExtractionService::new(Arc::clone(&document_text), Arc::clone(&vision), repair);
    (service, document_text, vision)
}

#[tokio::test]
async fn given_document_with_text_layer_when_extracting_then_native_text_wins_and_vision_is_skipped()
{
    let (service, _, vision) =
        service(StubDocumentText::with_pages(vec!["Invoice #100"]), StubVision::default());
    let document = SourceDocument::new("invoice.pdf".to_string(), 1024);

    let result = service.extract(b"%PDF-", &document).await;

    assert_eq!(result.text(), Some("Invoice #100"));
    assert_eq!(result.strategy(), Some(ExtractionStrategy::NativeText));
    assert!(result.error().is_none());
    assert_eq!(vision.document_text_calls.load(Ordering::SeqCst), 0);
    assert_eq!(vision.text_calls.load(Ordering::SeqCst), 0);
    assert_eq!(vision.object_calls.load(Ordering::SeqCst), 0);
    assert_eq!(vision.label_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_multi_page_document_when_extracting_then_blank_pages_are_dropped_and_rest_joined() {
    let (service, _, _) = service(
        StubDocumentText::with_pages(vec!["page one", "   ", "page three"]),
        StubVision::default(),
    );
    let document = SourceDocument::new("report.pdf".to_string(), 2048);

    let result = service.extract(b"%PDF-", &document).await;

    assert_eq!(result.text(), Some("page one\npage three"));
    assert_eq!(result.strategy(), Some(ExtractionStrategy::NativeText));
}

#[tokio::test]
async fn given_blank_text_layer_when_extracting_then_document_ocr_takes_over() {
    let vision = StubVision {
        document_text: Ok(Some("שלום עולם".to_string())),
        ..StubVision::default()
    };
    let (service, _, _) = service(StubDocumentText::with_pages(vec!["", "  "]), vision);
    let document = SourceDocument::new("scan.pdf".to_string(), 4096);

    let result = service.extract(b"%PDF-", &document).await;

    // No marker substring, so directional repair is a no-op.
    assert_eq!(result.text(), Some("שלום עולם"));
    assert_eq!(result.strategy(), Some(ExtractionStrategy::DocumentOcr));
}

#[tokio::test]
async fn given_unparseable_document_when_extracting_then_parse_failure_falls_through_to_ocr() {
    let vision = StubVision {
        document_text: Ok(Some("recovered by OCR".to_string())),
        ..StubVision::default()
    };
    let (service, document_text, _) = service(StubDocumentText::failing(), vision);
    let document = SourceDocument::new("broken.pdf".to_string(), 10);

    let result = service.extract(b"not a pdf", &document).await;

    assert_eq!(document_text.calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.text(), Some("recovered by OCR"));
    assert_eq!(result.strategy(), Some(ExtractionStrategy::DocumentOcr));
}

#[tokio::test]
async fn given_image_when_extracting_then_native_text_stage_never_runs() {
    let vision = StubVision {
        text: Ok(Some("street sign".to_string())),
        ..StubVision::default()
    };
    let (service, document_text, _) = service(StubDocumentText::with_pages(vec!["hidden"]), vision);
    let document = SourceDocument::new("photo.jpg".to_string(), 512);

    let result = service.extract(b"\xFF\xD8\xFF", &document).await;

    assert_eq!(document_text.calls.load(Ordering::SeqCst), 0);
    assert_eq!(result.strategy(), Some(ExtractionStrategy::GenericOcr));
}

#[tokio::test]
async fn given_document_ocr_failure_when_extracting_then_generic_ocr_takes_over() {
    let vision = StubVision {
        document_text: Err("synthetic outage".to_string()),
        text: Ok(Some("fallback text".to_string())),
        ..StubVision::default()
    };
    let (service, _, vision_handle) = service(StubDocumentText::failing(), vision);
    let document = SourceDocument::new("scan.pdf".to_string(), 100);

    let result = service.extract(b"%PDF-", &document).await;

    assert_eq!(vision_handle.document_text_calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.text(), Some("fallback text"));
    assert_eq!(result.strategy(), Some(ExtractionStrategy::GenericOcr));
    assert!(result.error().is_none());
}

#[tokio::test]
async fn given_whitespace_only_ocr_output_when_extracting_then_next_stage_is_tried() {
    let vision = StubVision {
        document_text: Ok(Some("   \n\t ".to_string())),
        text: Ok(Some("actual content".to_string())),
        ..StubVision::default()
    };
    let (service, _, _) = service(StubDocumentText::failing(), vision);
    let document = SourceDocument::new("faint.pdf".to_string(), 100);

    let result = service.extract(b"%PDF-", &document).await;

    assert_eq!(result.text(), Some("actual content"));
    assert_eq!(result.strategy(), Some(ExtractionStrategy::GenericOcr));
}

#[tokio::test]
async fn given_text_free_image_with_objects_when_extracting_then_object_summary_is_synthesized() {
    let vision = StubVision {
        objects: Ok(objects(&["cat", "sofa"])),
        ..StubVision::default()
    };
    let (service, _, _) = service(StubDocumentText::failing(), vision);
    let document = SourceDocument::new("photo.jpg".to_string(), 512);

    let result = service.extract(b"\xFF\xD8\xFF", &document).await;

    assert_eq!(result.text(), Some("Objects detected: cat, sofa"));
    assert_eq!(result.strategy(), Some(ExtractionStrategy::ObjectDetection));
}

#[tokio::test]
async fn given_many_detected_objects_when_extracting_then_summary_lists_top_five() {
    let vision = StubVision {
        objects: Ok(objects(&["a", "b", "c", "d", "e", "f", "g"])),
        ..StubVision::default()
    };
    let (service, _, _) = service(StubDocumentText::failing(), vision);
    let document = SourceDocument::new("busy.jpg".to_string(), 512);

    let result = service.extract(b"\xFF\xD8\xFF", &document).await;

    assert_eq!(result.text(), Some("Objects detected: a, b, c, d, e"));
}

#[tokio::test]
async fn given_only_labels_when_extracting_then_label_summary_is_synthesized() {
    let vision = StubVision {
        labels: Ok(labels(&["beach", "sand", "sky"])),
        ..StubVision::default()
    };
    let (service, _, _) = service(StubDocumentText::failing(), vision);
    let document = SourceDocument::new("vacation.jpg".to_string(), 512);

    let result = service.extract(b"\xFF\xD8\xFF", &document).await;

    assert_eq!(result.text(), Some("Image contains: beach, sand, sky"));
    assert_eq!(result.strategy(), Some(ExtractionStrategy::LabelDetection));
}

#[tokio::test]
async fn given_every_strategy_empty_when_extracting_then_sentinel_names_the_file() {
    let (service, _, _) = service(StubDocumentText::failing(), StubVision::default());
    let document = SourceDocument::new("photo.jpg".to_string(), 512);

    let result = service.extract(b"\xFF\xD8\xFF", &document).await;

    assert_eq!(
        result.text(),
        Some("No text or recognizable content found in photo.jpg")
    );
    assert!(result.is_exhausted());
    assert!(result.strategy().is_none());
    assert!(result.error().is_none());
}

#[tokio::test]
async fn given_final_stage_failure_when_extracting_then_provider_error_surfaces() {
    let vision = StubVision {
        labels: Err("label service down".to_string()),
        ..StubVision::default()
    };
    let (service, _, _) = service(StubDocumentText::failing(), vision);
    let document = SourceDocument::new("photo.jpg".to_string(), 512);

    let result = service.extract(b"\xFF\xD8\xFF", &document).await;

    assert!(result.text().is_none());
    assert!(result.strategy().is_none());
    let error = result.error().expect("final stage failure must surface");
    assert!(error.to_string().contains("label service down"));
}

#[tokio::test]
async fn given_mid_cascade_failure_with_final_success_when_extracting_then_no_error_is_reported() {
    let vision = StubVision {
        document_text: Err("ocr outage".to_string()),
        text: Err("ocr outage".to_string()),
        objects: Err("localizer outage".to_string()),
        labels: Ok(labels(&["document"])),
        ..StubVision::default()
    };
    let (service, _, _) = service(StubDocumentText::failing(), vision);
    let document = SourceDocument::new("scan.pdf".to_string(), 100);

    let result = service.extract(b"%PDF-", &document).await;

    assert_eq!(result.text(), Some("Image contains: document"));
    assert!(result.error().is_none());
}

#[tokio::test]
async fn given_mirrored_hebrew_ocr_output_when_extracting_then_repair_is_applied() {
    let marker_line = "ךמס תדועת";
    let vision = StubVision {
        document_text: Ok(Some(marker_line.to_string())),
        ..StubVision::default()
    };
    let (service, _, _) = service(StubDocumentText::failing(), vision);
    let document = SourceDocument::new("scan.pdf".to_string(), 100);

    let result = service.extract(b"%PDF-", &document).await;

    let expected: String = marker_line.chars().rev().collect();
    assert_eq!(result.text(), Some(expected.as_str()));
    assert_eq!(result.strategy(), Some(ExtractionStrategy::DocumentOcr));
}
